//! 프롬프트 조립
//!
//! 프롬프트 = 시스템 지시문 + few-shot 예시마다 user/assistant 턴 한 쌍 + 마지막 user 턴(질문).
//! 예시 부분은 한 번만 만들어 공유합니다.

pub mod system;

use std::fmt;
use std::sync::Arc;

use super::example_store::Example;
use super::question::Question;

pub use system::SYSTEM_PROMPT;

/// 프롬프트 턴의 화자
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// 텍스트 렌더링에 쓰는 라벨
    pub fn label(self) -> &'static str {
        match self {
            Role::System => "System",
            Role::User => "Human",
            Role::Assistant => "AI",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role.label(), self.content)
    }
}

/// 질문 하나에 대해 조립된 프롬프트
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDocument {
    system_instruction: Arc<str>,
    examples: Arc<[Example]>,
    example_turns: Arc<[Turn]>,
    user_turn: String,
}

impl PromptDocument {
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn user_turn(&self) -> &str {
        &self.user_turn
    }

    /// Few-shot 턴만 (시스템 턴과 마지막 user 턴 제외)
    pub fn example_turns(&self) -> &[Turn] {
        &self.example_turns
    }

    /// 전송 순서대로의 전체 턴
    pub fn turns(&self) -> Vec<Turn> {
        let mut turns = Vec::with_capacity(self.example_turns.len() + 2);
        turns.push(Turn::new(Role::System, &*self.system_instruction));
        turns.extend(self.example_turns.iter().cloned());
        turns.push(Turn::new(Role::User, &self.user_turn));
        turns
    }

    /// 턴마다 `Label: content` 한 줄로 렌더링
    pub fn render(&self) -> String {
        self.turns()
            .iter()
            .map(Turn::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// 고정된 지시문과 예시 집합으로 프롬프트를 조립
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    system_instruction: Arc<str>,
    examples: Arc<[Example]>,
    example_turns: Arc<[Turn]>,
}

impl PromptAssembler {
    pub fn new(system_instruction: impl Into<Arc<str>>, examples: Arc<[Example]>) -> Self {
        let example_turns = example_turns(&examples);
        Self {
            system_instruction: system_instruction.into(),
            examples,
            example_turns,
        }
    }

    /// Middleman 시스템 프롬프트를 사용하는 조립기
    pub fn middleman(examples: Arc<[Example]>) -> Self {
        Self::new(SYSTEM_PROMPT, examples)
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn assemble(&self, question: &Question) -> PromptDocument {
        PromptDocument {
            system_instruction: Arc::clone(&self.system_instruction),
            examples: Arc::clone(&self.examples),
            example_turns: Arc::clone(&self.example_turns),
            user_turn: question.text().to_string(),
        }
    }
}

fn example_turns(examples: &[Example]) -> Arc<[Turn]> {
    examples
        .iter()
        .flat_map(|example| {
            [
                Turn::new(Role::User, &example.input),
                Turn::new(Role::Assistant, &example.output),
            ]
        })
        .collect()
}

/// 조립기 없이 Middleman 시스템 프롬프트로 한 번 조립
pub fn assemble(examples: &[Example], question: &Question) -> PromptDocument {
    PromptAssembler::middleman(examples.to_vec().into()).assemble(question)
}
