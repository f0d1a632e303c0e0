use axum::{extract::State, Json};

use super::dto::HealthStatus;
use super::service::check_health;
use crate::AppState;

/// 헬스 체크
///
/// 버전, 가동 시간, 시작 시 로드한 항목을 반환합니다.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is up", body = HealthStatus)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(check_health(
        state.middleman.assembler().examples().len(),
        state.model_credentials,
    ))
}
