use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, Stop,
    },
    Client,
};

use super::prompt::{PromptDocument, Role, Turn};
use crate::config::{AppConfig, ModelParams};

/// 모델 호출 실패
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvocationError {
    #[error("network error: {0}")]
    Network(String),
    #[error("model endpoint rejected credentials: {0}")]
    Unauthorized(String),
    #[error("model quota or rate limit exceeded: {0}")]
    QuotaExceeded(String),
    #[error("model provider error: {0}")]
    Provider(String),
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
    #[error("could not build model request: {0}")]
    InvalidRequest(String),
}

impl InvocationError {
    /// 구조화 로그와 메트릭용 짧은 태그
    pub fn kind(&self) -> &'static str {
        match self {
            InvocationError::Network(_) => "network",
            InvocationError::Unauthorized(_) => "unauthorized",
            InvocationError::QuotaExceeded(_) => "quota",
            InvocationError::Provider(_) => "provider",
            InvocationError::MalformedResponse(_) => "malformed_response",
            InvocationError::InvalidRequest(_) => "invalid_request",
        }
    }
}

/// 프로바이더 에러를 `InvocationError`로 분류
fn classify_openai_error(error: OpenAIError) -> InvocationError {
    match error {
        OpenAIError::ApiError(api_err) => {
            let err_type = api_err.r#type.as_deref().unwrap_or("");
            let message = api_err.message;
            let lowered = message.to_lowercase();

            if err_type == "authentication_error"
                || lowered.contains("api key")
                || lowered.contains("credential")
            {
                InvocationError::Unauthorized(message)
            } else if err_type == "rate_limit_error"
                || lowered.contains("rate limit")
                || lowered.contains("quota")
                || lowered.contains("throttl")
            {
                InvocationError::QuotaExceeded(message)
            } else {
                InvocationError::Provider(message)
            }
        }
        OpenAIError::Reqwest(req_err) => {
            let status = req_err.status().map(|s| s.as_u16());
            if req_err.is_timeout() || req_err.is_connect() {
                InvocationError::Network(req_err.to_string())
            } else if matches!(status, Some(401) | Some(403)) {
                InvocationError::Unauthorized(req_err.to_string())
            } else if status == Some(429) {
                InvocationError::QuotaExceeded(req_err.to_string())
            } else if req_err.is_decode() {
                InvocationError::MalformedResponse(req_err.to_string())
            } else if status.is_some() {
                InvocationError::Provider(req_err.to_string())
            } else {
                InvocationError::Network(req_err.to_string())
            }
        }
        OpenAIError::JSONDeserialize(err) => InvocationError::MalformedResponse(err.to_string()),
        OpenAIError::InvalidArgument(msg) => InvocationError::InvalidRequest(msg),
        other => InvocationError::Provider(other.to_string()),
    }
}

/// 모델 클라이언트 인터페이스
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ModelClientTrait: Send + Sync {
    /// 전체 프롬프트를 보내고 응답 텍스트를 그대로 반환
    async fn complete(&self, prompt: &PromptDocument) -> Result<String, InvocationError>;
}

pub type ModelClient = Arc<dyn ModelClientTrait>;

/// 첫 실패에서 바로 포기하는 backoff (재시도 없음)
fn no_retry() -> backoff::ExponentialBackoff {
    backoff::ExponentialBackoff {
        max_elapsed_time: Some(Duration::ZERO),
        ..Default::default()
    }
}

/// OpenAI 호환 chat-completions 엔드포인트 클라이언트
#[derive(Clone)]
pub struct ChatModelClient {
    client: Client<OpenAIConfig>,
    model_id: String,
    params: ModelParams,
}

impl ChatModelClient {
    pub fn new(api_base: &str, api_key: &str, model_id: &str, params: ModelParams) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(api_base)
            .with_api_key(api_key);
        Self {
            client: Client::with_config(config).with_backoff(no_retry()),
            model_id: model_id.to_string(),
            params,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.model_api_base,
            &config.model_api_key,
            &config.model_id,
            config.model_params.clone(),
        )
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// 고정 디코딩 파라미터를 담은 채팅 완성 요청 생성
    #[allow(deprecated)]
    pub fn build_request(
        &self,
        prompt: &PromptDocument,
    ) -> Result<CreateChatCompletionRequest, InvocationError> {
        CreateChatCompletionRequestArgs::default()
            .model(self.model_id.as_str())
            .messages(build_messages(prompt)?)
            .max_tokens(self.params.max_tokens)
            .temperature(self.params.temperature)
            .stop(Stop::StringArray(self.params.stop_sequences.clone()))
            .build()
            .map_err(|e| InvocationError::InvalidRequest(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ModelClientTrait for ChatModelClient {
    async fn complete(&self, prompt: &PromptDocument) -> Result<String, InvocationError> {
        let request = self.build_request(prompt)?;

        tracing::debug!(
            model = %self.model_id,
            turns = prompt.example_turns().len() + 2,
            "Sending chat completion request"
        );

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify_openai_error)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                InvocationError::MalformedResponse("response carried no message content".into())
            })
    }
}

/// 프롬프트 턴을 순서대로 채팅 메시지로 변환
pub(crate) fn build_messages(
    prompt: &PromptDocument,
) -> Result<Vec<ChatCompletionRequestMessage>, InvocationError> {
    prompt.turns().iter().map(build_message).collect()
}

fn build_message(turn: &Turn) -> Result<ChatCompletionRequestMessage, InvocationError> {
    let content = turn.content.as_str();
    let message = match turn.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map(ChatCompletionRequestMessage::System),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map(ChatCompletionRequestMessage::User),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()
            .map(ChatCompletionRequestMessage::Assistant),
    };
    message.map_err(|e| InvocationError::InvalidRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::middleman::example_store::Example;
    use crate::domain::middleman::prompt::{PromptAssembler, SYSTEM_PROMPT};
    use crate::domain::middleman::question::validate;

    fn document() -> PromptDocument {
        PromptAssembler::middleman(vec![Example::new("A", "B")].into())
            .assemble(&validate("hello").unwrap())
    }

    #[test]
    fn should_create_chat_model_client() {
        let client = ChatModelClient::new(
            "http://localhost:1/v1",
            "test-key",
            "anthropic.claude-v2",
            ModelParams::default(),
        );

        assert_eq!(client.model_id(), "anthropic.claude-v2");
    }

    #[test]
    fn no_retry_backoff_should_stop_immediately() {
        let backoff = no_retry();

        assert_eq!(backoff.max_elapsed_time, Some(Duration::ZERO));
    }

    #[test]
    fn should_build_one_message_per_turn() {
        let messages = build_messages(&document()).unwrap();

        assert_eq!(messages.len(), 4);
    }

    #[test]
    fn should_map_roles_to_message_kinds() {
        // Act
        let messages = build_messages(&document()).unwrap();

        // Assert
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(
            messages[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
        assert!(matches!(messages[3], ChatCompletionRequestMessage::User(_)));
    }

    fn message_text(message: &ChatCompletionRequestMessage) -> (&'static str, String) {
        use async_openai::types::{
            ChatCompletionRequestAssistantMessageContent, ChatCompletionRequestSystemMessageContent,
            ChatCompletionRequestUserMessageContent,
        };

        match message {
            ChatCompletionRequestMessage::System(m) => match &m.content {
                ChatCompletionRequestSystemMessageContent::Text(text) => ("system", text.clone()),
                _ => panic!("system message is not plain text"),
            },
            ChatCompletionRequestMessage::User(m) => match &m.content {
                ChatCompletionRequestUserMessageContent::Text(text) => ("user", text.clone()),
                _ => panic!("user message is not plain text"),
            },
            ChatCompletionRequestMessage::Assistant(m) => match &m.content {
                Some(ChatCompletionRequestAssistantMessageContent::Text(text)) => {
                    ("assistant", text.clone())
                }
                _ => panic!("assistant message is not plain text"),
            },
            _ => panic!("unexpected message kind"),
        }
    }

    #[test]
    #[allow(deprecated)]
    fn request_should_carry_model_and_decoding_parameters() {
        // Arrange
        let client = ChatModelClient::new(
            "http://localhost:1/v1",
            "test-key",
            "anthropic.claude-v2",
            ModelParams::default(),
        );

        // Act
        let request = client.build_request(&document()).unwrap();

        // Assert
        assert_eq!(request.model, "anthropic.claude-v2");
        assert_eq!(request.max_tokens, Some(400));
        assert_eq!(request.temperature, Some(0.0));
        match &request.stop {
            Some(Stop::StringArray(stops)) => assert_eq!(stops, &vec!["\n\nHuman".to_string()]),
            other => panic!("unexpected stop sequences: {:?}", other),
        }
    }

    #[test]
    fn request_messages_should_follow_prompt_order() {
        let client = ChatModelClient::new(
            "http://localhost:1/v1",
            "test-key",
            "anthropic.claude-v2",
            ModelParams::default(),
        );

        let request = client.build_request(&document()).unwrap();
        let messages: Vec<_> = request.messages.iter().map(message_text).collect();

        assert_eq!(
            messages,
            vec![
                ("system", SYSTEM_PROMPT.to_string()),
                ("user", "A".to_string()),
                ("assistant", "B".to_string()),
                ("user", "hello".to_string()),
            ]
        );
    }

    #[test]
    fn should_classify_invalid_argument_as_invalid_request() {
        let error = classify_openai_error(OpenAIError::InvalidArgument("bad".to_string()));

        assert_eq!(error, InvocationError::InvalidRequest("bad".to_string()));
    }

    #[test]
    fn should_classify_undecodable_body_as_malformed() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();

        let error = classify_openai_error(OpenAIError::JSONDeserialize(json_err));

        assert_eq!(error.kind(), "malformed_response");
    }

    #[tokio::test]
    async fn unreachable_endpoint_should_fail_with_network_error() {
        // Arrange
        let client = ChatModelClient::new(
            "http://127.0.0.1:1/v1",
            "test-key",
            "anthropic.claude-v2",
            ModelParams::default(),
        );

        // Act
        let result = client.complete(&document()).await;

        // Assert
        assert!(matches!(result, Err(InvocationError::Network(_))));
    }

    #[test]
    fn invocation_error_kinds_should_be_distinct() {
        let kinds = [
            InvocationError::Network(String::new()).kind(),
            InvocationError::Unauthorized(String::new()).kind(),
            InvocationError::QuotaExceeded(String::new()).kind(),
            InvocationError::Provider(String::new()).kind(),
            InvocationError::MalformedResponse(String::new()).kind(),
            InvocationError::InvalidRequest(String::new()).kind(),
        ];

        let unique: std::collections::HashSet<_> = kinds.iter().collect();
        assert_eq!(unique.len(), kinds.len());
    }
}
