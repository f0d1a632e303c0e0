use axum::{
    extract::{rejection::FormRejection, Query, State},
    response::Html,
    Form,
};
use serde::Deserialize;
use validator::Validate;

use super::page::render_page;
use super::state::{Controls, ShellAction, Transition, UiState};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub preset: Option<usize>,
}

/// 두 버튼이 공통으로 전송하는 폼
#[derive(Debug, Deserialize, Validate)]
pub struct ShellForm {
    #[serde(default)]
    #[validate(custom = "crate::domain::middleman::dto::validate_question_length")]
    pub question: String,
    pub action: ShellAction,
    #[serde(default = "enabled")]
    pub submit_enabled: bool,
    #[serde(default)]
    pub clear_enabled: bool,
}

fn enabled() -> bool {
    true
}

impl ShellForm {
    fn into_parts(self) -> (UiState, ShellAction) {
        let state = UiState {
            question: self.question,
            controls: Controls {
                submit_enabled: self.submit_enabled,
                clear_enabled: self.clear_enabled,
            },
            panel: None,
        };
        (state, self.action)
    }
}

/// 초기 페이지 (선택한 프리셋 질문으로 채움)
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let question = match query.preset {
        Some(index) => state
            .presets
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("preset {}", index)))?,
        None => state.presets.first().cloned().unwrap_or_default(),
    };

    Ok(Html(render_page(
        &UiState::with_question(question),
        &state.presets,
    )))
}

/// 버튼 클릭 하나를 적용하고 다시 렌더링
pub async fn act(
    State(state): State<AppState>,
    form: Result<Form<ShellForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form?;
    form.validate()?;
    let (ui_state, action) = form.into_parts();

    tracing::debug!(action = ?action, controls = ?ui_state.controls, "Shell action received");

    let next = match ui_state.apply(action) {
        Transition::Ask(question) => {
            let answer = state.middleman.invoke(question.as_str()).await;
            UiState::answered(question, answer.text)
        }
        Transition::Cleared(cleared) => cleared,
        Transition::Ignored(unchanged) => {
            tracing::debug!(action = ?action, "Ignoring disabled action");
            unchanged
        }
    };

    Ok(Html(render_page(&next, &state.presets)))
}
