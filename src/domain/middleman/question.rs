//! 질문 입력 검증
//!
//! 질문은 타입 없이 들어옵니다 (폼 텍스트 또는 임의의 JSON). `RawQuestion`이 경계 타입이며,
//! `Text` 형태만 `Question`이 될 수 있습니다.

use std::fmt;

use serde_json::Value;

/// 외부에서 받은 그대로의 질문
#[derive(Debug, Clone, PartialEq)]
pub enum RawQuestion {
    Text(String),
    Number(serde_json::Number),
    Boolean(bool),
    Null,
    Array(Vec<Value>),
    Object(serde_json::Map<String, Value>),
}

impl RawQuestion {
    /// 검증 메시지에 쓰이는 입력 형태 이름
    pub fn kind(&self) -> &'static str {
        match self {
            RawQuestion::Text(_) => "string",
            RawQuestion::Number(_) => "number",
            RawQuestion::Boolean(_) => "boolean",
            RawQuestion::Null => "null",
            RawQuestion::Array(_) => "array",
            RawQuestion::Object(_) => "object",
        }
    }
}

impl From<Value> for RawQuestion {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => RawQuestion::Text(text),
            Value::Number(number) => RawQuestion::Number(number),
            Value::Bool(flag) => RawQuestion::Boolean(flag),
            Value::Null => RawQuestion::Null,
            Value::Array(items) => RawQuestion::Array(items),
            Value::Object(map) => RawQuestion::Object(map),
        }
    }
}

impl From<String> for RawQuestion {
    fn from(text: String) -> Self {
        RawQuestion::Text(text)
    }
}

impl From<&str> for RawQuestion {
    fn from(text: &str) -> Self {
        RawQuestion::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("TypeError: question must be a string, got {found}")]
    TypeError { found: &'static str },
    #[error("EmptyInputError: question is empty after normalization")]
    EmptyInput,
}

/// 검증 및 공백 정규화가 끝난 질문
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn into_text(self) -> String {
        self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 연속된 공백(개행 포함)을 공백 하나로 합치고 양 끝을 제거합니다.
///
/// ASCII 정보 구분 문자(`\x1c`..=`\x1f`)도 공백으로 취급합니다.
pub fn normalize(text: &str) -> String {
    text.split(is_separator)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// 원본 질문을 `Question`으로 변환합니다.
///
/// 본문 안의 `Human:`, `System:` 같은 턴 표식은 걸러내지 않고 그대로 둡니다.
pub fn validate(raw: impl Into<RawQuestion>) -> Result<Question, QuestionError> {
    match raw.into() {
        RawQuestion::Text(text) => {
            let normalized = normalize(&text);
            if normalized.is_empty() {
                return Err(QuestionError::EmptyInput);
            }
            Ok(Question(normalized))
        }
        other @ (RawQuestion::Number(_)
        | RawQuestion::Boolean(_)
        | RawQuestion::Null
        | RawQuestion::Array(_)
        | RawQuestion::Object(_)) => Err(QuestionError::TypeError {
            found: other.kind(),
        }),
    }
}
