//! Payload protocol negotiation.

/// Protocol id assumed when an endpoint declares none.
///
/// Endpoints that predate protocol negotiation always speak the Avro-framed
/// encoding, so an absent `next-protocol` field resolves to this id.
pub const DEFAULT_PROTOCOL_ID: &str = "avro";

/// Resolves the effective payload protocol for an exchange.
///
/// A declared id is returned verbatim; whether the id is one the processing
/// pipeline can actually decode is checked there, not here.
#[derive(Debug, Clone)]
pub struct ProtocolNegotiator {
    default_id: String,
}

impl ProtocolNegotiator {
    /// Creates a negotiator with the given fallback protocol id.
    pub fn new(default_id: impl Into<String>) -> Self {
        Self {
            default_id: default_id.into(),
        }
    }

    /// Returns the fallback protocol id.
    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    /// Resolves the protocol id for a request.
    pub fn resolve<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.default_id)
    }
}

impl Default for ProtocolNegotiator {
    fn default() -> Self {
        Self::new(DEFAULT_PROTOCOL_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_id_resolves_to_default() {
        let negotiator = ProtocolNegotiator::default();
        assert_eq!(negotiator.resolve(None), DEFAULT_PROTOCOL_ID);
    }

    #[test]
    fn declared_id_is_returned_verbatim() {
        let negotiator = ProtocolNegotiator::default();
        assert_eq!(negotiator.resolve(Some("json-v2")), "json-v2");
        // No validation at this layer, even for ids nobody registered.
        assert_eq!(negotiator.resolve(Some("not-a-codec")), "not-a-codec");
    }

    #[test]
    fn custom_default() {
        let negotiator = ProtocolNegotiator::new("protobuf");
        assert_eq!(negotiator.resolve(None), "protobuf");
        assert_eq!(negotiator.resolve(Some("avro")), "avro");
    }
}
