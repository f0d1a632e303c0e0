use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::middleman::QuestionError;
use crate::response::ErrorResponse;

/// HTTP 레벨 에러 (공통 응답 형식으로 변환)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Malformed request body: {0}")]
    JsonParseFailed(String),

    #[error("{0}")]
    InvalidQuestion(#[from] QuestionError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// 응답에 담기는 에러 코드
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::InvalidQuestion(_) => "MIDDLEMAN_001",
            AppError::NotFound(_) => "COMMON404",
        }
    }

    /// 에러에 대응하는 HTTP 상태 코드
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::JsonParseFailed(_)
            | AppError::InvalidQuestion(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        tracing::warn!(code, error = %self, "Request rejected");

        (status, Json(ErrorResponse::new(code, self.to_string()))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}
