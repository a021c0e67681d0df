//! Transport response assembly.

use fleetsync_protocol::fields::{
    RESPONSE_KIND_HEADER, RESPONSE_KIND_OPERATION, SYNC_CONTENT_TYPE,
};

/// Transport status of every operations response.
///
/// Application outcomes travel inside the body envelope; the transport
/// status never encodes them.
pub const STATUS_OK: u16 = 200;

/// Connection header directive for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionDirective {
    /// Keep the connection open for the next exchange.
    KeepAlive,
    /// Close the connection once the response is written.
    Close,
}

impl ConnectionDirective {
    /// Returns the wire value of the `Connection` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionDirective::KeepAlive => "keep-alive",
            ConnectionDirective::Close => "close",
        }
    }
}

/// A fully framed sync response, ready for the transport to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    body: Vec<u8>,
    connection: ConnectionDirective,
}

impl TransportResponse {
    /// Transport status code.
    pub fn status(&self) -> u16 {
        STATUS_OK
    }

    /// Value of the `Content-Type` header.
    pub fn content_type(&self) -> &'static str {
        SYNC_CONTENT_TYPE
    }

    /// Exact byte length of the body.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Value of the response-kind header.
    pub fn response_kind(&self) -> &'static str {
        RESPONSE_KIND_OPERATION
    }

    /// Connection directive for this response.
    pub fn connection(&self) -> ConnectionDirective {
        self.connection
    }

    /// Response body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the response, returning the body.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Header list in wire order.
    pub fn header_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", SYNC_CONTENT_TYPE.to_string()),
            ("Content-Length", self.body.len().to_string()),
            (RESPONSE_KIND_HEADER, RESPONSE_KIND_OPERATION.to_string()),
            ("Connection", self.connection.as_str().to_string()),
        ]
    }
}

/// Assembles transport responses for completed exchanges.
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Builds the response for `body` under the channel's connection policy.
    ///
    /// `force_close` wins over the client's keep-alive preference: one-shot
    /// channels close unconditionally after their single cycle. Otherwise
    /// the response mirrors what the client asked for.
    pub fn build(
        body: Vec<u8>,
        keep_alive_requested: bool,
        force_close: bool,
    ) -> TransportResponse {
        let connection = if force_close || !keep_alive_requested {
            ConnectionDirective::Close
        } else {
            ConnectionDirective::KeepAlive
        };
        TransportResponse { body, connection }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_keeps_alive() {
        let response = ResponseBuilder::build(Vec::new(), true, false);
        assert_eq!(response.connection(), ConnectionDirective::KeepAlive);
        assert_eq!(response.content_length(), 0);
        assert_eq!(response.status(), STATUS_OK);
    }

    #[test]
    fn force_close_wins_over_keep_alive() {
        let response = ResponseBuilder::build(b"x".to_vec(), true, true);
        assert_eq!(response.connection(), ConnectionDirective::Close);
    }

    #[test]
    fn mirrors_client_preference() {
        let response = ResponseBuilder::build(b"x".to_vec(), false, false);
        assert_eq!(response.connection(), ConnectionDirective::Close);

        let response = ResponseBuilder::build(b"x".to_vec(), true, false);
        assert_eq!(response.connection(), ConnectionDirective::KeepAlive);
    }

    #[test]
    fn header_pairs_in_wire_order() {
        let response = ResponseBuilder::build(b"12345".to_vec(), true, false);
        let headers = response.header_pairs();
        assert_eq!(headers[0], ("Content-Type", "application/x-fleetsync".to_string()));
        assert_eq!(headers[1], ("Content-Length", "5".to_string()));
        assert_eq!(headers[2], ("X-Response-Kind", "operation".to_string()));
        assert_eq!(headers[3], ("Connection", "keep-alive".to_string()));
    }
}
