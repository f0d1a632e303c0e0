use std::time::Instant;

use super::dto::{HealthState, HealthStatus};

/// 프로세스 시작 시각
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// 시작 시각 기록 (이후 호출은 첫 값을 유지)
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

pub fn get_uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

/// 시작 시 로드한 정보로 헬스 리포트를 만듭니다.
///
/// 모델은 호출하지 않습니다 (호출마다 과금됨).
pub fn check_health(examples_loaded: usize, model_credentials: bool) -> HealthStatus {
    HealthStatus {
        status: determine_health_state(examples_loaded, model_credentials),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: get_uptime_secs(),
        examples_loaded,
        model_credentials,
    }
}

fn determine_health_state(examples_loaded: usize, model_credentials: bool) -> HealthState {
    if examples_loaded == 0 || !model_credentials {
        HealthState::Degraded
    } else {
        HealthState::Healthy
    }
}
