//! Processing pipeline seam.
//!
//! The command layer performs no sync or delta logic itself; it hands the
//! parsed request to a per-channel [`SyncProcessor`] and carries the result
//! to the response builder.

use crate::channel::ChannelType;
use fleetsync_protocol::{ProfileServerSync, SyncRequest, SyncResponse};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// Error raised by the sync processing pipeline.
///
/// Re-raised to the transport unchanged; retries, if any, are the
/// endpoint's responsibility on a later attempt.
#[derive(Error, Debug)]
#[error("sync processing failed: {message}")]
pub struct ProcessingError {
    message: String,
}

impl ProcessingError {
    /// Creates a processing error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Output of one processing pass.
#[derive(Debug, Clone)]
pub struct ProcessedSync {
    /// Serialized response envelope to hand back to the endpoint.
    pub response: SyncResponse,
    /// Profile section status, for diagnostics.
    pub profile: ProfileServerSync,
}

impl ProcessedSync {
    /// Creates a processing result from envelope bytes.
    pub fn new(body: Vec<u8>, profile: ProfileServerSync) -> Self {
        Self {
            response: SyncResponse::new(body),
            profile,
        }
    }
}

/// The per-channel sync processing hook.
///
/// Implementations compute deltas and profiles for one request. The
/// `protocol` argument is the negotiated payload encoding; a pipeline that
/// has no codec for it fails with a [`ProcessingError`].
pub trait SyncProcessor: Send + Sync {
    /// Processes a parsed request whose payload uses `protocol` encoding.
    fn process(
        &self,
        request: &SyncRequest,
        protocol: &str,
    ) -> Result<ProcessedSync, ProcessingError>;
}

/// Closed set of per-channel processing strategies.
///
/// One strategy per [`ChannelType`] variant, so channel dispatch stays
/// exhaustive at compile time.
#[derive(Clone)]
pub struct ProcessorSet {
    one_shot: Arc<dyn SyncProcessor>,
    long_poll: Arc<dyn SyncProcessor>,
}

impl ProcessorSet {
    /// Creates a set with distinct per-channel strategies.
    pub fn new(one_shot: Arc<dyn SyncProcessor>, long_poll: Arc<dyn SyncProcessor>) -> Self {
        Self {
            one_shot,
            long_poll,
        }
    }

    /// Creates a set that uses one strategy for every channel.
    pub fn uniform(processor: Arc<dyn SyncProcessor>) -> Self {
        Self {
            one_shot: Arc::clone(&processor),
            long_poll: processor,
        }
    }

    /// Returns the strategy for `channel`.
    pub fn for_channel(&self, channel: ChannelType) -> &dyn SyncProcessor {
        match channel {
            ChannelType::OneShot => self.one_shot.as_ref(),
            ChannelType::LongPoll => self.long_poll.as_ref(),
        }
    }
}

/// A mock processor for testing.
#[derive(Default)]
pub struct MockProcessor {
    response: Mutex<Option<ProcessedSync>>,
    error: Mutex<Option<String>>,
}

impl MockProcessor {
    /// Creates a new mock processor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the result returned by the next calls.
    pub fn set_response(&self, response: ProcessedSync) {
        *self.response.lock() = Some(response);
    }

    /// Makes the processor fail with the given message.
    pub fn set_error(&self, message: impl Into<String>) {
        *self.error.lock() = Some(message.into());
    }
}

impl SyncProcessor for MockProcessor {
    fn process(
        &self,
        _request: &SyncRequest,
        _protocol: &str,
    ) -> Result<ProcessedSync, ProcessingError> {
        if let Some(message) = self.error.lock().clone() {
            return Err(ProcessingError::new(message));
        }
        self.response
            .lock()
            .clone()
            .ok_or_else(|| ProcessingError::new("no mock response set"))
    }
}
