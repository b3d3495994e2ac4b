//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! The master secret never appears here; only the name of the environment
//! variable holding it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::{RetrySettings, DEFAULT_ATTEMPT_TIMEOUT};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct TokenIdConfig {
    /// Identifier codec settings.
    pub codec: CodecConfig,

    /// Resilient client settings.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Identifier codec configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CodecConfig {
    /// Environment variable holding the master secret.
    pub secret_env: String,

    /// Hex-encoded salt. Empty means "derive from the secret", which keeps
    /// tokens compatible with those already issued by the token service.
    pub salt_hex: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            secret_env: "TOKENID_SECRET".to_string(),
            salt_hex: String::new(),
        }
    }
}

impl CodecConfig {
    /// Decoded salt, or `None` when it should be derived from the secret.
    pub fn salt_bytes(&self) -> Result<Option<Vec<u8>>, hex::FromHexError> {
        if self.salt_hex.is_empty() {
            return Ok(None);
        }
        hex::decode(&self.salt_hex).map(Some)
    }
}

/// Resilient client configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Token service base URL.
    pub base_url: String,

    /// API version path segment appended to the base URL.
    pub api_version: String,

    /// Budget for a whole call in seconds; 0 disables the deadline.
    pub request_timeout_secs: u64,

    /// Maximum attempts per call.
    pub max_attempts: u32,

    /// Delay before the second attempt in seconds; doubles afterwards.
    pub base_retry_delay_secs: f64,

    /// Connect and response budget of a single attempt, in seconds.
    pub attempt_timeout_secs: f64,

    /// Allow plain-http base URLs.
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:5000/".to_string(),
            api_version: "v1".to_string(),
            request_timeout_secs: 5,
            max_attempts: 5,
            base_retry_delay_secs: 2.0,
            attempt_timeout_secs: 5.0,
            debug: false,
        }
    }
}

impl ClientConfig {
    /// Client-wide defaults for the resilient client.
    ///
    /// An invalid delay (negative or not finite) becomes zero; validation
    /// rejects such configs before they get here.
    pub fn retry_settings(&self) -> RetrySettings {
        RetrySettings {
            request_timeout_secs: self.request_timeout_secs,
            max_attempts: self.max_attempts,
            base_retry_delay: Duration::try_from_secs_f64(self.base_retry_delay_secs)
                .unwrap_or_default(),
        }
    }

    /// Budget of a single attempt; invalid values fall back to the default.
    pub fn attempt_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.attempt_timeout_secs)
            .ok()
            .filter(|timeout| !timeout.is_zero())
            .unwrap_or(DEFAULT_ATTEMPT_TIMEOUT)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TokenIdConfig::default();
        assert_eq!(config.codec.secret_env, "TOKENID_SECRET");
        assert_eq!(config.client.max_attempts, 5);
        assert_eq!(config.client.request_timeout_secs, 5);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: TokenIdConfig = toml::from_str(
            r#"
            [client]
            max_attempts = 3
            base_retry_delay_secs = 0.5
            attempt_timeout_secs = 1.5
            "#,
        )
        .unwrap();

        assert_eq!(config.client.max_attempts, 3);
        assert_eq!(config.client.api_version, "v1");
        assert_eq!(config.codec, CodecConfig::default());

        let settings = config.client.retry_settings();
        assert_eq!(settings.base_retry_delay, Duration::from_millis(500));
        assert_eq!(settings.request_timeout_secs, 5);
        assert_eq!(config.client.attempt_timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn test_salt_bytes() {
        let mut codec = CodecConfig::default();
        assert_eq!(codec.salt_bytes().unwrap(), None);

        codec.salt_hex = "00ff10".to_string();
        assert_eq!(codec.salt_bytes().unwrap(), Some(vec![0x00, 0xff, 0x10]));

        codec.salt_hex = "zz".to_string();
        assert!(codec.salt_bytes().is_err());
    }

    #[test]
    fn test_invalid_delay_becomes_zero() {
        let client = ClientConfig {
            base_retry_delay_secs: -1.0,
            ..ClientConfig::default()
        };
        assert_eq!(client.retry_settings().base_retry_delay, Duration::ZERO);
    }

    #[test]
    fn test_attempt_timeout_defaults() {
        assert_eq!(ClientConfig::default().attempt_timeout(), DEFAULT_ATTEMPT_TIMEOUT);

        let client = ClientConfig {
            attempt_timeout_secs: 0.0,
            ..ClientConfig::default()
        };
        assert_eq!(client.attempt_timeout(), DEFAULT_ATTEMPT_TIMEOUT);
    }
}
