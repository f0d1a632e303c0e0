pub mod config;
pub mod domain;
pub mod error;
pub mod global;
pub mod logging;
pub mod response;
pub mod shutdown;

use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use domain::middleman::{
    Answer, ChatModelClient, Example, ExampleStore, InvocationError, MiddlemanService,
    ModelClientTrait, PromptDocument,
};

use domain::{health, middleman, shell};

#[derive(OpenApi)]
#[openapi(
    paths(
        middleman::handler::ask,
        middleman::handler::render_prompt,
        middleman::handler::presets,
        health::handler::health_check,
    ),
    components(
        schemas(
            middleman::dto::QuestionRequest,
            middleman::dto::AskResponse,
            middleman::dto::PromptResponse,
            middleman::dto::PresetsResponse,
            middleman::dto::AskSuccessResponse,
            middleman::dto::PromptSuccessResponse,
            middleman::dto::PresetsSuccessResponse,
            health::dto::HealthStatus,
            health::dto::HealthState,
            response::ErrorResponse,
        )
    ),
    tags(
        (name = "Middleman", description = "Support question forwarding API"),
        (name = "Health", description = "Liveness and startup state")
    )
)]
pub struct ApiDoc;

/// 모든 핸들러가 공유하는 상태
#[derive(Clone)]
pub struct AppState {
    pub middleman: Arc<MiddlemanService>,
    /// UI 프리셋 질문 (시작 시 예시 저장소에서 한 번 추출)
    pub presets: Arc<[String]>,
    pub model_credentials: bool,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(store: &ExampleStore, service: MiddlemanService, model_credentials: bool) -> Self {
        Self {
            middleman: Arc::new(service),
            presets: store.presets().into(),
            model_credentials,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

async fn render_metrics(State(state): State<AppState>) -> String {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}

/// 전체 애플리케이션 라우터
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(shell::handler::index).post(shell::handler::act))
        .route("/health", get(health::handler::health_check))
        .route("/api/middleman/ask", post(middleman::handler::ask))
        .route("/api/middleman/prompt", post(middleman::handler::render_prompt))
        .route("/api/middleman/presets", get(middleman::handler::presets));

    if state.metrics.is_some() {
        router = router.route("/metrics", get(render_metrics));
    }

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(global::middleware::request_tracing))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 테스트용 라우터 (주어진 예시 + Mock 모델 클라이언트)
pub fn create_test_router_with_mock<C>(examples: Vec<Example>, client: C) -> Router
where
    C: ModelClientTrait + 'static,
{
    let store = ExampleStore::from(examples);
    let service = MiddlemanService::from_store(&store, client);
    create_router(AppState::new(&store, service, true))
}
