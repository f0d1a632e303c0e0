use serde::Serialize;
use utoipa::ToSchema;

/// 헬스 체크 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    /// 시작 시 로드된 few-shot 예시 수
    #[schema(example = 7)]
    pub examples_loaded: usize,
    /// 모델 API 키 설정 여부
    pub model_credentials: bool,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    /// 서비스 중이지만 답변이 없거나 예시 없이 생성됨
    Degraded,
}
