//! Generation gateway backends implementing the core generation port.

mod http;

pub use http::{GenerationConfig, HttpContentGenerator};

use async_trait::async_trait;
use postline_core::ports::{ContentGenerator, GenerationError};

/// Stand-in used when no generation endpoint is configured. Every call
/// fails with [`GenerationError::NotConfigured`].
pub struct DisabledGenerator;

#[async_trait]
impl ContentGenerator for DisabledGenerator {
    async fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
        tracing::warn!("generation requested but no endpoint is configured");
        Err(GenerationError::NotConfigured)
    }
}
