use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::LlmError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// Raw completion text plus the model identifier echoed by the endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
    pub content: String,
    pub model: String,
}

/// Single-exchange chat completion. No streaming, no conversation state.
#[async_trait]
pub trait ChatCompletionProvider: Send + Sync {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<ChatCompletion, LlmError>;
}
