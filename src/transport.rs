//! Streaming completion transport abstraction.
//!
//! [`CompletionTransport`] is the only thing the relay knows about the remote
//! service: open one streaming completion for a system/user prompt pair and
//! get back an ordered [`FragmentStream`]. The production implementation is
//! [`crate::provider::Provider`]; tests use a scripted in-memory fake.

use futures::stream::LocalBoxStream;
use std::time::Duration;

/// Ordered sequence of text fragments from an open completion.
///
/// `None` from the stream is a clean end-of-stream. Dropping the stream
/// closes the underlying connection.
pub type FragmentStream = LocalBoxStream<'static, Result<String, TransportError>>;

/// A single streaming completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    /// Sent with the system role.
    pub system_prompt: String,
    /// Sent with the user role.
    pub user_prompt: String,
}

impl CompletionRequest {
    pub fn new(
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
        }
    }
}

/// Failures reported by a transport.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a stream (auth, network, bad request).
    #[error("failed to open completion stream: {0}")]
    Open(String),
    /// The stream broke after it was opened.
    #[error("completion stream interrupted: {0}")]
    Stream(String),
    /// No fragment arrived within the configured idle timeout.
    #[error("no response from completion stream within {0:?}")]
    IdleTimeout(Duration),
}

/// Remote streaming text-generation capability.
///
/// Runs on a single-threaded runtime, so neither the trait object nor its
/// futures need to be `Send`.
#[async_trait::async_trait(?Send)]
pub trait CompletionTransport {
    /// Model identifier configured at startup.
    fn model(&self) -> &str;

    /// Opens exactly one streaming completion.
    async fn open_stream(
        &self,
        request: CompletionRequest,
    ) -> Result<FragmentStream, TransportError>;
}
