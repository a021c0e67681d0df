//! Per-exchange request and response records.

/// A decoded sync request.
///
/// Built once per exchange by the request parser and immutable afterwards.
/// The payload is always present on a successfully parsed request; the
/// signature and session key depend on the security mode the endpoint
/// negotiated, which is not enforced here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Request signature over the payload, when the endpoint sent one.
    pub signature: Option<Vec<u8>>,
    /// Encoded session key, when the endpoint sent one.
    pub session_key: Option<Vec<u8>>,
    /// Opaque sync payload.
    pub payload: Vec<u8>,
    /// Payload protocol id declared by the endpoint.
    pub requested_protocol: Option<String>,
}

impl SyncRequest {
    /// Creates a request carrying only a payload.
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            signature: None,
            session_key: None,
            payload,
            requested_protocol: None,
        }
    }

    /// Returns true if the request carries both security fields.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some() && self.session_key.is_some()
    }
}

/// A sync response body produced by the processing pipeline.
///
/// Owned by the command until handed to the response builder; may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResponse {
    /// Serialized response envelope.
    pub body: Vec<u8>,
}

impl SyncResponse {
    /// Creates a response from envelope bytes.
    pub fn new(body: Vec<u8>) -> Self {
        Self { body }
    }

    /// Returns the body length in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
