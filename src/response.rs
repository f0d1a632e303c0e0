use serde::Serialize;
use utoipa::ToSchema;

/// 모든 JSON 응답의 공통 형식
///
/// ```json
/// {
///   "isSuccess": true,
///   "code": "COMMON200",
///   "message": "Success",
///   "result": { ... }
/// }
/// ```
///
/// OpenAPI 문서에는 엔드포인트별 `*SuccessResponse` 스키마로 노출됩니다.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse<T: Serialize> {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<T>,
}

impl<T: Serialize> BaseResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            is_success: true,
            code: "COMMON200".to_string(),
            message: "Success".to_string(),
            result: Some(result),
        }
    }
}

/// 에러 응답 (`result`는 항상 null)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub is_success: bool,

    #[schema(example = "COMMON400")]
    pub code: String,

    #[schema(example = "Malformed request body: expected value at line 1 column 1")]
    pub message: String,

    pub result: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            code: code.into(),
            message: message.into(),
            result: None,
        }
    }
}
