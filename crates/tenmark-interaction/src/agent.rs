//! Provider agent traits and their shared error type.
//!
//! Agents are thin, stateless wrappers over one HTTP capability each. The
//! gateway owns all fallback behavior; agents report failures honestly and
//! never substitute content themselves.

use async_trait::async_trait;
use std::time::Duration;
use tenmark_core::ImageSource;
use thiserror::Error;

/// Error type for provider agent calls.
#[derive(Error, Debug, Clone)]
pub enum AgentError {
    /// Agent-side failure (bad payload, missing content, unusable response)
    #[error("Agent execution failed: {0}")]
    ExecutionFailed(String),

    /// HTTP-level failure with retryability information
    #[error("Provider call failed ({status_code:?}): {message}")]
    ProcessError {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The caller-enforced deadline elapsed before the provider settled
    #[error("Provider call timed out after {0:?}")]
    Timeout(Duration),

    /// Anything else
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Creates a ProcessError carrying a `Retry-After` delay.
    pub fn process_error_with_retry_after(
        status_code: u16,
        message: String,
        is_retryable: bool,
        retry_after: Duration,
    ) -> Self {
        Self::ProcessError {
            status_code: Some(status_code),
            message,
            is_retryable,
            retry_after: Some(retry_after),
        }
    }

    /// Whether retrying the same call could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ProcessError { is_retryable, .. } => *is_retryable,
            Self::Timeout(_) => true,
            _ => false,
        }
    }
}

/// A single-message text completion request.
#[derive(Debug, Clone)]
pub struct TextRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// An image generation request. Size and quality are fixed by the wizard
/// (square posters only) but travel with the request so agents stay dumb.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
    pub size: String,
    pub quality: String,
}

impl ImageRequest {
    /// The standard square poster request.
    pub fn square(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            size: "1024x1024".to_string(),
            quality: "high".to_string(),
        }
    }
}

/// A text generation capability.
#[async_trait]
pub trait TextAgent: Send + Sync {
    async fn complete(&self, request: TextRequest) -> Result<String, AgentError>;
}

/// An image generation capability.
#[async_trait]
pub trait ImageAgent: Send + Sync {
    async fn generate(&self, request: ImageRequest) -> Result<ImageSource, AgentError>;
}
