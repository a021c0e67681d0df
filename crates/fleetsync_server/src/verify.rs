//! Request verification seam.
//!
//! The command layer authenticates requests through [`RequestVerifier`]
//! before any processing runs. Which scheme endpoints actually use is the
//! deployment's choice; [`HmacVerifier`] is the reference implementation.

use fleetsync_protocol::SyncRequest;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Errors raised by request verification.
#[derive(Error, Debug)]
pub enum SecurityError {
    /// The request carries no signature.
    #[error("request signature missing")]
    MissingSignature,

    /// The request carries no session key.
    #[error("session key missing")]
    MissingSessionKey,

    /// The signature does not match the request content.
    #[error("request signature mismatch")]
    SignatureMismatch,
}

/// Verifies the signature and session key of a parsed sync request.
///
/// Implementations raise on failure; a failed check is never downgraded to
/// a log line.
pub trait RequestVerifier: Send + Sync {
    /// Verifies `request`, returning an error when authentication fails.
    fn verify(&self, request: &SyncRequest) -> Result<(), SecurityError>;
}

/// Verifier that accepts every request.
///
/// For channels whose security mode is enforced at a different layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl RequestVerifier for AcceptAll {
    fn verify(&self, _request: &SyncRequest) -> Result<(), SecurityError> {
        Ok(())
    }
}

/// HMAC-SHA256 reference verifier.
///
/// Expects the signature field to be HMAC-SHA256 over the session key
/// followed by the payload, keyed with a secret shared out of band.
#[derive(Clone)]
pub struct HmacVerifier {
    secret: Vec<u8>,
}

impl HmacVerifier {
    /// Creates a verifier with the given shared secret.
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Computes the expected signature for a session key and payload.
    ///
    /// Endpoint-side helper; servers only verify.
    pub fn sign(&self, session_key: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(session_key);
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

impl RequestVerifier for HmacVerifier {
    fn verify(&self, request: &SyncRequest) -> Result<(), SecurityError> {
        let signature = request
            .signature
            .as_deref()
            .ok_or(SecurityError::MissingSignature)?;
        let session_key = request
            .session_key
            .as_deref()
            .ok_or(SecurityError::MissingSessionKey)?;

        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(session_key);
        mac.update(&request.payload);
        mac.verify_slice(signature)
            .map_err(|_| SecurityError::SignatureMismatch)
    }
}
