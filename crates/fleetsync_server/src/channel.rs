//! Channel types served by the command layer.

/// Transport interaction mode of the endpoint channel an exchange arrived on.
///
/// The channel set is closed: each variant couples a processing strategy
/// (see [`crate::ProcessorSet`]) with a connection policy. Adding a channel
/// means extending this enum, not subclassing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    /// Single request/response cycle; the connection closes after RESPOND.
    OneShot,
    /// Held-open polling channel; connection reuse follows the client.
    LongPoll,
}

impl ChannelType {
    /// Whether responses on this channel always close the connection.
    pub fn forces_close(&self) -> bool {
        matches!(self, ChannelType::OneShot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_policy() {
        assert!(ChannelType::OneShot.forces_close());
        assert!(!ChannelType::LongPoll.forces_close());
    }
}
