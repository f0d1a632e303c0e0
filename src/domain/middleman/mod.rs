pub mod client;
pub mod dto;
pub mod example_store;
pub mod handler;
pub mod prompt;
pub mod question;
pub mod service;

pub use client::{ChatModelClient, InvocationError, ModelClient, ModelClientTrait};
pub use example_store::{Example, ExampleStore, ExampleStoreError};
pub use prompt::{PromptAssembler, PromptDocument, Role, Turn, SYSTEM_PROMPT};
pub use question::{validate, Question, QuestionError, RawQuestion};
pub use service::{Answer, AnswerFailure, MiddlemanService};
