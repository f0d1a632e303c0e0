use std::process::ExitCode;

use metrics_exporter_prometheus::PrometheusBuilder;
use middleman_server::{
    config::AppConfig, create_router, domain::health::service::init_start_time,
    logging::init_logging, shutdown::shutdown_signal, AppState, ChatModelClient, ExampleStore,
    MiddlemanService,
};

#[tokio::main]
async fn main() -> ExitCode {
    // 1. 환경 변수 + 로깅
    dotenvy::dotenv().ok();
    init_logging();
    init_start_time();

    // 2. 설정
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // 3. Few-shot 예시 로드 (없으면 서버를 띄우지 않음)
    let store = match ExampleStore::load(&config.examples_path) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %err, "Could not load few-shot examples");
            return ExitCode::FAILURE;
        }
    };

    // 4. 모델 클라이언트 + 서비스
    let client = ChatModelClient::from_config(&config);
    tracing::info!(
        model = %config.model_id,
        region = %config.region,
        profile = %config.profile,
        api_base = %config.model_api_base,
        "Model client configured"
    );
    let service = MiddlemanService::from_store(&store, client);
    let mut state = AppState::new(&store, service, !config.model_api_key.is_empty());

    // 5. 메트릭
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(err) => tracing::warn!(error = %err, "Metrics recorder not installed"),
    }

    // 6. 서버 실행
    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(addr = %addr, error = %err, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(addr = %addr, "Middleman server listening");

    if let Err(err) = axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "Server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Server stopped");
    ExitCode::SUCCESS
}
