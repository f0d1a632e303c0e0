use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use super::dto::{
    AskResponse, AskSuccessResponse, PresetsResponse, PresetsSuccessResponse, PromptResponse,
    PromptSuccessResponse, QuestionRequest,
};
use crate::error::AppError;
use crate::response::{BaseResponse, ErrorResponse};
use crate::AppState;

/// 지원 질문 전달
///
/// 본문이 파싱되면 항상 200을 반환합니다. 질문이 거부되거나 모델 호출이 실패하면
/// `answer`는 null입니다.
#[utoipa::path(
    post,
    path = "/api/middleman/ask",
    tag = "Middleman",
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Answer produced or absent", body = AskSuccessResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse)
    )
)]
pub async fn ask(
    State(state): State<AppState>,
    request: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<AskResponse>>, AppError> {
    let Json(request) = request?;

    tracing::info!(
        is_text = request.question.is_string(),
        "Ask request received"
    );

    request.validate()?;

    let answer = state.middleman.invoke(request.question).await;

    Ok(Json(BaseResponse::success(AskResponse {
        answer: answer.text,
    })))
}

/// 모델 호출 없이 조립된 프롬프트 렌더링
#[utoipa::path(
    post,
    path = "/api/middleman/prompt",
    tag = "Middleman",
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Rendered prompt", body = PromptSuccessResponse),
        (status = 400, description = "Invalid question", body = ErrorResponse)
    )
)]
pub async fn render_prompt(
    State(state): State<AppState>,
    request: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<PromptResponse>>, AppError> {
    let Json(request) = request?;

    request.validate()?;

    let prompt = state.middleman.render_prompt(request.question)?;

    tracing::debug!(prompt_length = prompt.len(), "Prompt rendered");

    Ok(Json(BaseResponse::success(PromptResponse { prompt })))
}

/// UI에서 제공하는 프리셋 질문 조회
#[utoipa::path(
    get,
    path = "/api/middleman/presets",
    tag = "Middleman",
    responses(
        (status = 200, description = "First stored example questions", body = PresetsSuccessResponse)
    )
)]
pub async fn presets(State(state): State<AppState>) -> Json<BaseResponse<PresetsResponse>> {
    Json(BaseResponse::success(PresetsResponse {
        presets: state.presets.to_vec(),
    }))
}
