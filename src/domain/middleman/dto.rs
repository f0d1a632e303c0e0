use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// HTTP로 받는 텍스트 질문의 최대 길이 (문자 수)
pub const MAX_QUESTION_CHARS: usize = 8000;

/// JSON API와 페이지 폼이 함께 쓰는 길이 검사
pub fn validate_question_length(text: &str) -> Result<(), ValidationError> {
    if text.chars().count() > MAX_QUESTION_CHARS {
        let mut error = ValidationError::new("question_too_long");
        error.message =
            Some(format!("question must be at most {} characters", MAX_QUESTION_CHARS).into());
        return Err(error);
    }
    Ok(())
}

/// 텍스트만 길이를 검사 (형태와 빈 값 검사는 질문 검증기 담당)
fn validate_question_size(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::String(text) => validate_question_length(text),
        _ => Ok(()),
    }
}

/// 질문 요청 DTO
///
/// `question`은 모든 JSON 값을 받습니다. 텍스트가 아닌 값은 역직렬화가 아니라
/// 검증 단계에서 거부됩니다. 필드가 없으면 `null`로 취급합니다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    #[serde(default)]
    #[validate(custom = "validate_question_size")]
    #[schema(value_type = String, example = "Hi, my application in AWS EKS seems to be stuck in a deployment loop, can you have a look?")]
    pub question: Value,
}

/// 답변 DTO (답변을 만들지 못하면 `answer`는 null)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    #[schema(example = "Could you share the deployment logs and the name of the namespace?")]
    pub answer: Option<String>,
}

/// 렌더링된 프롬프트 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    pub prompt: String,
}

/// 프리셋 질문 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresetsResponse {
    pub presets: Vec<String>,
}

/// 질문 전달 성공 응답 (OpenAPI 스키마용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskSuccessResponse {
    #[schema(example = true)]
    pub is_success: bool,
    #[schema(example = "COMMON200")]
    pub code: String,
    #[schema(example = "Success")]
    pub message: String,
    pub result: AskResponse,
}

/// 프롬프트 렌더링 성공 응답 (OpenAPI 스키마용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptSuccessResponse {
    #[schema(example = true)]
    pub is_success: bool,
    #[schema(example = "COMMON200")]
    pub code: String,
    #[schema(example = "Success")]
    pub message: String,
    pub result: PromptResponse,
}

/// 프리셋 조회 성공 응답 (OpenAPI 스키마용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresetsSuccessResponse {
    #[schema(example = true)]
    pub is_success: bool,
    #[schema(example = "COMMON200")]
    pub code: String,
    #[schema(example = "Success")]
    pub message: String,
    pub result: PresetsResponse,
}
