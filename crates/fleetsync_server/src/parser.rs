//! Inbound request parsing.

use crate::config::ServerConfig;
use crate::error::{CommandError, CommandResult};
use fleetsync_multipart::{
    boundary_from_content_type, is_multipart, MultipartDecoder, MultipartError, Part,
};
use fleetsync_protocol::{fields, SyncRequest};

/// Raw request as delivered by the transport.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    /// Value of the `Content-Type` header, when present.
    pub content_type: Option<String>,
    /// Raw request body.
    pub body: Vec<u8>,
    /// Whether the client asked to keep the connection open.
    pub keep_alive: bool,
}

impl InboundRequest {
    /// Creates a request with no content type and keep-alive set.
    pub fn new(body: Vec<u8>) -> Self {
        Self {
            content_type: None,
            body,
            keep_alive: true,
        }
    }

    /// Sets the `Content-Type` header value.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the client's keep-alive preference.
    pub fn with_keep_alive(mut self, keep_alive: bool) -> Self {
        self.keep_alive = keep_alive;
        self
    }
}

/// Extracts a [`SyncRequest`] from an inbound transport request.
///
/// Multipart bodies are decoded into named fields. Any other body is taken
/// whole as the sync payload: the transport routes only sync traffic here,
/// so a non-multipart body is the payload itself.
#[derive(Debug, Clone)]
pub struct MultipartRequestParser {
    max_parts: usize,
    max_part_bytes: usize,
}

impl MultipartRequestParser {
    /// Creates a parser with the configured decode limits.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            max_parts: config.max_parts,
            max_part_bytes: config.max_part_bytes,
        }
    }

    /// Parses one inbound request.
    ///
    /// # Errors
    ///
    /// Returns a client-classified error for undecodable multipart bodies,
    /// a missing `sync-data` field, or a non-UTF-8 `next-protocol` field.
    pub fn parse(&self, inbound: &InboundRequest) -> CommandResult<SyncRequest> {
        match inbound.content_type.as_deref() {
            Some(content_type) if is_multipart(content_type) => {
                let boundary = boundary_from_content_type(content_type).ok_or(
                    CommandError::MalformedRequest(MultipartError::MissingBoundary),
                )?;
                let parts = MultipartDecoder::new(&inbound.body, boundary)
                    .with_limits(self.max_parts, self.max_part_bytes)
                    .decode()?;
                map_fields(parts)
            }
            _ => Ok(SyncRequest::new(inbound.body.clone())),
        }
    }
}

/// Assigns decoded parts to sync request fields by canonical name.
///
/// Diagnostics record field sizes only; signature and session-key bytes are
/// secrets and never reach the log.
fn map_fields(parts: Vec<Part>) -> CommandResult<SyncRequest> {
    let mut signature = None;
    let mut session_key = None;
    let mut payload = None;
    let mut requested_protocol = None;

    for part in parts {
        if !part.is_attribute() {
            tracing::trace!(field = %part.name, "skipping file part");
            continue;
        }
        match part.name.as_str() {
            fields::SIGNATURE_FIELD => {
                tracing::trace!(field = %part.name, len = part.data.len(), "signature set");
                signature = Some(part.data);
            }
            fields::SESSION_KEY_FIELD => {
                tracing::trace!(field = %part.name, len = part.data.len(), "session key set");
                session_key = Some(part.data);
            }
            fields::SYNC_DATA_FIELD => {
                tracing::trace!(field = %part.name, len = part.data.len(), "payload set");
                payload = Some(part.data);
            }
            fields::NEXT_PROTOCOL_FIELD => match part.as_text() {
                Some(id) => {
                    tracing::trace!(field = %part.name, protocol = %id, "next protocol set");
                    requested_protocol = Some(id.to_string());
                }
                None => return Err(CommandError::InvalidField(fields::NEXT_PROTOCOL_FIELD)),
            },
            _ => {
                // Unknown fields are ignored for forward compatibility.
                tracing::trace!(field = %part.name, "ignoring unrecognized field");
            }
        }
    }

    let payload = payload.ok_or(CommandError::MissingField(fields::SYNC_DATA_FIELD))?;
    Ok(SyncRequest {
        signature,
        session_key,
        payload,
        requested_protocol,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: &str = "req";

    fn multipart_body(parts: &[(&str, &[u8])]) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, data) in parts {
            out.extend_from_slice(b"--req\r\n");
            out.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            );
            out.extend_from_slice(data);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"--req--\r\n");
        out
    }

    fn multipart_request(parts: &[(&str, &[u8])]) -> InboundRequest {
        InboundRequest::new(multipart_body(parts))
            .with_content_type(format!("multipart/form-data; boundary={BOUNDARY}"))
    }

    fn parser() -> MultipartRequestParser {
        MultipartRequestParser::new(&ServerConfig::default())
    }

    #[test]
    fn all_fields_extracted() {
        let inbound = multipart_request(&[
            (fields::SIGNATURE_FIELD, b"SIG"),
            (fields::SESSION_KEY_FIELD, b"KEY"),
            (fields::SYNC_DATA_FIELD, b"PAYLOAD"),
            (fields::NEXT_PROTOCOL_FIELD, b"json-v2"),
        ]);

        let request = parser().parse(&inbound).unwrap();
        assert_eq!(request.signature.as_deref(), Some(b"SIG".as_slice()));
        assert_eq!(request.session_key.as_deref(), Some(b"KEY".as_slice()));
        assert_eq!(request.payload, b"PAYLOAD");
        assert_eq!(request.requested_protocol.as_deref(), Some("json-v2"));
    }

    #[test]
    fn unknown_fields_ignored_without_contamination() {
        let inbound = multipart_request(&[
            ("future-field", b"whatever"),
            (fields::SYNC_DATA_FIELD, b"PAYLOAD"),
            ("another-one", b"ignored"),
        ]);

        let request = parser().parse(&inbound).unwrap();
        assert_eq!(request.payload, b"PAYLOAD");
        assert!(request.signature.is_none());
        assert!(request.session_key.is_none());
        assert!(request.requested_protocol.is_none());
    }

    #[test]
    fn empty_multipart_is_malformed() {
        let inbound = multipart_request(&[]);
        let err = parser().parse(&inbound).unwrap_err();
        assert!(matches!(err, CommandError::MalformedRequest(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn missing_payload_field_fails() {
        let inbound = multipart_request(&[(fields::SIGNATURE_FIELD, b"SIG")]);
        let err = parser().parse(&inbound).unwrap_err();
        assert!(matches!(
            err,
            CommandError::MissingField(fields::SYNC_DATA_FIELD)
        ));
    }

    #[test]
    fn file_parts_are_skipped() {
        // A file part named sync-data does not count as the payload field.
        let mut body = Vec::new();
        body.extend_from_slice(b"--req\r\n");
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"sync-data\"; filename=\"blob\"\r\n\r\n",
        );
        body.extend_from_slice(b"DATA\r\n--req--\r\n");
        let inbound = InboundRequest::new(body)
            .with_content_type(format!("multipart/form-data; boundary={BOUNDARY}"));

        let err = parser().parse(&inbound).unwrap_err();
        assert!(matches!(err, CommandError::MissingField(_)));
    }

    #[test]
    fn non_utf8_protocol_field_rejected() {
        let inbound = multipart_request(&[
            (fields::SYNC_DATA_FIELD, b"PAYLOAD"),
            (fields::NEXT_PROTOCOL_FIELD, &[0xff, 0xfe]),
        ]);
        let err = parser().parse(&inbound).unwrap_err();
        assert!(matches!(
            err,
            CommandError::InvalidField(fields::NEXT_PROTOCOL_FIELD)
        ));
    }

    #[test]
    fn multipart_without_boundary_param_rejected() {
        let inbound =
            InboundRequest::new(b"body".to_vec()).with_content_type("multipart/form-data");
        let err = parser().parse(&inbound).unwrap_err();
        assert!(matches!(
            err,
            CommandError::MalformedRequest(MultipartError::MissingBoundary)
        ));
    }

    #[test]
    fn non_multipart_body_is_the_payload() {
        let inbound =
            InboundRequest::new(b"raw envelope".to_vec()).with_content_type("application/x-fleetsync");
        let request = parser().parse(&inbound).unwrap();
        assert_eq!(request.payload, b"raw envelope");
        assert!(request.signature.is_none());
    }

    #[test]
    fn missing_content_type_is_the_payload() {
        let inbound = InboundRequest::new(b"raw envelope".to_vec());
        let request = parser().parse(&inbound).unwrap();
        assert_eq!(request.payload, b"raw envelope");
    }
}
