//! Client configuration.

/// Poll interval used when the server has not set one.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 100;

/// Configuration for the client.
///
/// The endpoint defaults to the current page address, matching the server
/// that served the bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Control endpoint URL; `None` means the current page address.
    pub endpoint: Option<String>,
    /// Initial poll interval in milliseconds. The server may replace it at
    /// runtime via `update_interval`.
    pub interval_ms: u32,
}

impl ClientConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self {
            endpoint: None,
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Set an explicit control endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the initial poll interval in milliseconds.
    pub fn with_interval_ms(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new();
        assert_eq!(config.endpoint, None);
        assert_eq!(config.interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new()
            .with_endpoint("http://localhost:8080/")
            .with_interval_ms(250);
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8080/"));
        assert_eq!(config.interval_ms, 250);
    }
}
