use std::env;
use std::path::PathBuf;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-v2";
pub const DEFAULT_EXAMPLES_PATH: &str = "example-data.json";

/// 모든 모델 호출에 전달되는 고정 디코딩 파라미터
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    pub max_tokens: u16,
    pub temperature: f32,
    pub stop_sequences: Vec<String>,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            max_tokens: 400,
            temperature: 0.0,
            stop_sequences: vec!["\n\nHuman".to_string()],
        }
    }
}

/// 애플리케이션 설정 (환경 변수 및 `.env`에서 로드)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,

    /// 모델 엔드포인트 리전
    pub region: String,
    /// API 키 선택에 사용하는 자격 증명 프로필 이름
    pub profile: String,

    pub model_id: String,
    pub model_api_base: String,
    pub model_api_key: String,
    pub model_params: ModelParams,

    pub examples_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 키 조회 함수로 설정 생성 (빈 값은 미설정으로 취급)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let server_host = get("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let server_port = match get("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => 8080,
        };

        let region = get("AWS_DEFAULT_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let profile = get("AWS_PROFILE").unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        let model_id = get("MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());
        let model_api_base = get("MODEL_API_BASE").unwrap_or_else(|| default_api_base(&region));

        let model_api_key = get(&profile_key_var(&profile))
            .or_else(|| get("MODEL_API_KEY"))
            .unwrap_or_else(|| {
                tracing::warn!(
                    profile = %profile,
                    "No model API key configured; every model call will fail and return no answer"
                );
                String::new()
            });

        let examples_path = get("EXAMPLES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXAMPLES_PATH));

        Ok(Self {
            server_host,
            server_port,
            region,
            profile,
            model_id,
            model_api_base,
            model_api_key,
            model_params: ModelParams::default(),
            examples_path,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// `region`의 호스팅 모델 서비스 OpenAI 호환 채팅 엔드포인트
pub fn default_api_base(region: &str) -> String {
    format!("https://bedrock-runtime.{}.amazonaws.com/openai/v1", region)
}

/// 프로필별 API 키 환경 변수 이름 (예: `MODEL_API_KEY_SUPPORT_TEAM`)
pub fn profile_key_var(profile: &str) -> String {
    let suffix: String = profile
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("MODEL_API_KEY_{}", suffix)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}
