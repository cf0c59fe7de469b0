use async_trait::async_trait;

/// Text-generation port - submit a prompt, receive the model's raw text.
///
/// The post service owns prompt construction and output parsing; an
/// implementation only has to carry the completion call.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Generation gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Generation endpoint is not configured")]
    NotConfigured,

    #[error("Generation request failed: {0}")]
    Request(String),

    #[error("Generation endpoint returned an empty response")]
    EmptyResponse,
}
