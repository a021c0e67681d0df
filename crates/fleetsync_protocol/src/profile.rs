//! Profile section of the server-side sync envelope.

use serde::{Deserialize, Serialize};

/// Outcome of a profile sync step, as reported inside the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncResponseStatus {
    /// Delta applied; the endpoint is up to date.
    Success,
    /// Nothing changed since the endpoint's last known state.
    NoDelta,
    /// Endpoint state diverged; a full resync is required.
    ResyncRequired,
}

/// Profile section of the server-side sync envelope.
///
/// Carries exactly one field so it round-trips unchanged through the
/// pipeline's envelope serialization. The status is unset until the
/// pipeline records an outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileServerSync {
    response_status: Option<SyncResponseStatus>,
}

impl ProfileServerSync {
    /// Creates a record with an explicit status.
    pub fn new(status: SyncResponseStatus) -> Self {
        Self {
            response_status: Some(status),
        }
    }

    /// Returns the status, if one has been set.
    pub fn response_status(&self) -> Option<SyncResponseStatus> {
        self.response_status
    }

    /// Sets the status.
    pub fn set_response_status(&mut self, status: SyncResponseStatus) {
        self.response_status = Some(status);
    }
}
