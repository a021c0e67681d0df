//! Wire-level constants shared by endpoints and servers.
//!
//! Multipart field names are part of the endpoint contract; renaming one is
//! a breaking protocol change.

/// Multipart field carrying the request signature.
pub const SIGNATURE_FIELD: &str = "signature";

/// Multipart field carrying the encoded session key.
pub const SESSION_KEY_FIELD: &str = "session-key";

/// Multipart field carrying the opaque sync payload.
pub const SYNC_DATA_FIELD: &str = "sync-data";

/// Multipart field declaring the payload encoding for this exchange.
pub const NEXT_PROTOCOL_FIELD: &str = "next-protocol";

/// Media type of sync responses.
pub const SYNC_CONTENT_TYPE: &str = "application/x-fleetsync";

/// Header naming which kind of response the shared transport produced.
///
/// The same transport multiplexes operations, bootstrap, and admin traffic;
/// clients key on this header to route the response.
pub const RESPONSE_KIND_HEADER: &str = "X-Response-Kind";

/// Response kind for operations (sync) responses.
pub const RESPONSE_KIND_OPERATION: &str = "operation";

/// Response kind for bootstrap responses.
pub const RESPONSE_KIND_BOOTSTRAP: &str = "bootstrap";
