//! 단일 페이지 UI 상태
//!
//! 상태는 페이지(hidden 폼 필드)에 실려 오가고 렌더링마다 전달되므로,
//! 서버는 클릭 사이에 아무것도 보관하지 않습니다.

use serde::{Deserialize, Serialize};

/// 두 버튼의 활성화 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub submit_enabled: bool,
    pub clear_enabled: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            submit_enabled: true,
            clear_enabled: false,
        }
    }
}

impl Controls {
    fn is_enabled(&self, action: ShellAction) -> bool {
        match action {
            ShellAction::Submit => self.submit_enabled,
            ShellAction::Clear => self.clear_enabled,
        }
    }

    /// 누른 버튼은 비활성화되고 다른 버튼이 활성화됨
    fn after(action: ShellAction) -> Self {
        match action {
            ShellAction::Submit => Self {
                submit_enabled: false,
                clear_enabled: true,
            },
            ShellAction::Clear => Self {
                submit_enabled: true,
                clear_enabled: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellAction {
    Submit,
    Clear,
}

/// 화면에 표시되는 질문/답변 한 쌍
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub question: String,
    pub controls: Controls,
    pub panel: Option<Exchange>,
}

/// 요청된 동작에 대해 핸들러가 할 일
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// 모델에 질문한 뒤 `UiState::answered` 호출
    Ask(String),
    Cleared(UiState),
    /// 비활성화된 동작, 상태 변화 없음
    Ignored(UiState),
}

impl UiState {
    pub fn with_question(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }

    pub fn apply(self, action: ShellAction) -> Transition {
        if !self.controls.is_enabled(action) {
            return Transition::Ignored(self);
        }

        match action {
            ShellAction::Submit => Transition::Ask(self.question),
            ShellAction::Clear => Transition::Cleared(Self {
                question: self.question,
                controls: Controls::after(ShellAction::Clear),
                panel: None,
            }),
        }
    }

    /// 제출이 `answer`로 끝난 뒤의 상태
    pub fn answered(question: String, answer: Option<String>) -> Self {
        Self {
            question: question.clone(),
            controls: Controls::after(ShellAction::Submit),
            panel: Some(Exchange { question, answer }),
        }
    }
}
