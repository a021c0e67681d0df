//! Server configuration.

use fleetsync_protocol::DEFAULT_PROTOCOL_ID;

/// Configuration for the sync command layer.
///
/// Read-only after initialization and shared by every exchange.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Protocol id assumed when an endpoint declares none.
    pub default_protocol: String,
    /// Maximum number of parts accepted in one multipart body.
    pub max_parts: usize,
    /// Maximum content length of a single multipart part.
    pub max_part_bytes: usize,
}

impl ServerConfig {
    /// Creates a configuration with default limits.
    pub fn new() -> Self {
        Self {
            default_protocol: DEFAULT_PROTOCOL_ID.to_string(),
            max_parts: 64,
            max_part_bytes: 32 * 1024 * 1024,
        }
    }

    /// Sets the fallback protocol id.
    pub fn with_default_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.default_protocol = protocol.into();
        self
    }

    /// Sets the maximum multipart part count.
    pub fn with_max_parts(mut self, max: usize) -> Self {
        self.max_parts = max;
        self
    }

    /// Sets the maximum per-part content length.
    pub fn with_max_part_bytes(mut self, max: usize) -> Self {
        self.max_part_bytes = max;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}
