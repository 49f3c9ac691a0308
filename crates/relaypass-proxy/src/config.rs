//! Proxy configuration

use serde::{Deserialize, Serialize};

/// Proxy configuration. One relay process serves a single fixed downstream
/// server; every client session shares this immutable view.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Downstream server address (host:port)
    pub target_address: String,
    /// Forward steady-state packets without decoding or logging them.
    /// When false, per-packet diagnostic logging stays on after handoff.
    #[serde(default = "default_passthrough")]
    pub passthrough_packets: bool,
}

fn default_passthrough() -> bool {
    true
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            target_address: "127.0.0.1:19132".to_string(),
            passthrough_packets: true,
        }
    }
}

impl ProxyConfig {
    /// Create a configuration for `target_address`.
    pub fn new(target_address: impl Into<String>) -> Self {
        Self {
            target_address: target_address.into(),
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.target_address.is_empty() {
            return Err("target_address must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ProxyConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_target_is_rejected() {
        assert!(ProxyConfig::new("").validate().is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let config = ProxyConfig::new("play.example.net:19132");
        let json = serde_json::to_string(&config).unwrap();
        let restored: ProxyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.target_address, config.target_address);
        assert!(restored.passthrough_packets);
    }

    #[test]
    fn passthrough_defaults_on_when_absent() {
        let config: ProxyConfig =
            serde_json::from_str(r#"{"target_address":"play.example.net:19132"}"#).unwrap();
        assert!(config.passthrough_packets);
    }
}
