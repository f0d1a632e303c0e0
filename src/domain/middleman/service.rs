use std::sync::Arc;

use super::client::{InvocationError, ModelClient, ModelClientTrait};
use super::example_store::ExampleStore;
use super::prompt::{PromptAssembler, PromptDocument};
use super::question::{self, QuestionError, RawQuestion};

/// 호출 결과 (`None`이면 답변 없음)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    pub text: Option<String>,
}

impl Answer {
    pub fn answered(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_absent(&self) -> bool {
        self.text.is_none()
    }
}

/// 답변 실패 사유
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerFailure {
    #[error("validation error: {0}")]
    Validation(#[from] QuestionError),
    #[error("invocation error: {0}")]
    Invocation(#[from] InvocationError),
}

impl AnswerFailure {
    /// 메트릭 outcome 라벨
    pub fn outcome(&self) -> &'static str {
        match self {
            AnswerFailure::Validation(_) => "validation_failed",
            AnswerFailure::Invocation(_) => "invocation_failed",
        }
    }
}

/// 검증 → 조립 → 호출
pub struct MiddlemanService {
    assembler: PromptAssembler,
    client: ModelClient,
}

impl MiddlemanService {
    pub fn new(assembler: PromptAssembler, client: ModelClient) -> Self {
        Self { assembler, client }
    }

    /// 주어진 예시 저장소와 Middleman 시스템 프롬프트로 서비스 생성
    pub fn from_store(store: &ExampleStore, client: impl ModelClientTrait + 'static) -> Self {
        Self::new(
            PromptAssembler::middleman(store.shared()),
            Arc::new(client),
        )
    }

    pub fn assembler(&self) -> &PromptAssembler {
        &self.assembler
    }

    /// 모델 호출 없이 검증과 조립만 수행
    pub fn prepare(&self, raw: impl Into<RawQuestion>) -> Result<PromptDocument, QuestionError> {
        let question = question::validate(raw)?;
        Ok(self.assembler.assemble(&question))
    }

    /// 디버깅용 프롬프트 렌더링 (검증 에러를 삼키지 않고 반환)
    pub fn render_prompt(&self, raw: impl Into<RawQuestion>) -> Result<String, QuestionError> {
        Ok(self.prepare(raw)?.render())
    }

    /// 실패 사유를 유지하는 전체 파이프라인
    pub async fn try_answer(&self, raw: impl Into<RawQuestion>) -> Result<String, AnswerFailure> {
        // 1. 검증 + 조립
        let prompt = self.prepare(raw)?;

        // 2. 호출 (응답 텍스트는 가공하지 않음)
        let text = self.client.complete(&prompt).await?;

        Ok(text)
    }

    /// Fail-soft 진입점: 모든 실패는 로그를 남기고 빈 답변이 됩니다
    pub async fn invoke(&self, raw: impl Into<RawQuestion>) -> Answer {
        match self.try_answer(raw).await {
            Ok(text) => {
                tracing::info!(answer_length = text.len(), "Question answered");
                record_outcome("answered");
                Answer::answered(text)
            }
            Err(failure) => {
                match &failure {
                    AnswerFailure::Validation(err) => {
                        tracing::error!(failure = "validation", error = %err, "Validation Error");
                    }
                    AnswerFailure::Invocation(err) => {
                        tracing::error!(
                            failure = "invocation",
                            kind = err.kind(),
                            error = %err,
                            "Model invocation failed"
                        );
                    }
                }
                record_outcome(failure.outcome());
                Answer::absent()
            }
        }
    }
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!("middleman_answers_total", "outcome" => outcome).increment(1);
}
