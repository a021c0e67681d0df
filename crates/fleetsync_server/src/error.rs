//! Error types for the sync command layer.

use crate::command::CommandState;
use crate::process::ProcessingError;
use crate::verify::SecurityError;
use fleetsync_multipart::MultipartError;
use thiserror::Error;

/// Result type for command operations.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors that can occur while driving a sync exchange.
///
/// The command layer never picks transport status codes; the surrounding
/// transport maps the client/server classification onto its own wire.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The multipart body could not be decoded.
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] MultipartError),

    /// A required sync field is absent from the request.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field's content is not valid for its type.
    #[error("invalid field {0}: not valid UTF-8")]
    InvalidField(&'static str),

    /// Signature or session-key verification failed.
    #[error(transparent)]
    Security(#[from] SecurityError),

    /// The processing pipeline failed.
    #[error(transparent)]
    Processing(#[from] ProcessingError),

    /// The exchange was cancelled before a response could be written.
    #[error("exchange cancelled")]
    Cancelled,

    /// A lifecycle method was called out of order.
    #[error("invalid state transition from {from:?} to {to:?}")]
    InvalidState {
        /// State the command was in.
        from: CommandState,
        /// Transition that was attempted.
        to: CommandState,
    },
}

impl CommandError {
    /// Returns true if this is a client error (the request was at fault).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CommandError::MalformedRequest(_)
                | CommandError::MissingField(_)
                | CommandError::InvalidField(_)
                | CommandError::Security(_)
        )
    }

    /// Returns true if this is a server-side error.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            CommandError::Processing(_) | CommandError::Cancelled | CommandError::InvalidState { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classification() {
        let err = CommandError::MissingField("sync-data");
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = CommandError::Processing(ProcessingError::new("delta failed"));
        assert!(err.is_server_error());
        assert!(!err.is_client_error());

        let err = CommandError::MalformedRequest(MultipartError::Empty);
        assert!(err.is_client_error());
    }

    #[test]
    fn multipart_errors_convert() {
        let err: CommandError = MultipartError::MissingBoundary.into();
        assert!(matches!(err, CommandError::MalformedRequest(_)));
        assert!(err.to_string().contains("malformed request"));
    }
}
