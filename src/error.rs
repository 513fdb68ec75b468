//! Errors raised while running a configured prompt command.

use crate::transport::TransportError;

/// Why a prompt command invocation failed.
///
/// The first two variants are validation failures detected before the
/// transport is contacted; the last two come from the stream itself.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("no prompt text configured for {group}/{command}")]
    MisconfiguredCommand { group: String, command: String },

    #[error("no user prompt provided for {group}/{command}")]
    MissingUserInput { group: String, command: String },

    #[error(transparent)]
    TransportOpenFailure(TransportError),

    #[error(transparent)]
    TransportStreamFailure(TransportError),
}

impl From<TransportError> for PromptError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Open(_) => Self::TransportOpenFailure(err),
            TransportError::Stream(_) | TransportError::IdleTimeout(_) => {
                Self::TransportStreamFailure(err)
            }
        }
    }
}
