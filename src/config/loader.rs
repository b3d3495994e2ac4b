//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::codec::{CodecError, IdentifierCodec};
use crate::config::schema::{CodecConfig, TokenIdConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    /// The environment variable holding the master secret is unset.
    MissingSecret(String),
    Codec(CodecError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::MissingSecret(var) => {
                write!(f, "Secret not found: environment variable {} is not set", var)
            }
            ConfigError::Codec(e) => write!(f, "Codec error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<TokenIdConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<TokenIdConfig, ConfigError> {
    let config: TokenIdConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the identifier codec, reading the secret from the environment.
pub fn build_codec(config: &CodecConfig) -> Result<IdentifierCodec, ConfigError> {
    let secret = std::env::var(&config.secret_env)
        .map_err(|_| ConfigError::MissingSecret(config.secret_env.clone()))?;
    build_codec_with_secret(config, &secret)
}

/// Build the identifier codec from an explicit secret.
pub fn build_codec_with_secret(
    config: &CodecConfig,
    secret: &str,
) -> Result<IdentifierCodec, ConfigError> {
    let salt = config.salt_bytes().map_err(|e| {
        ConfigError::Validation(vec![ValidationError {
            field: "codec.salt_hex",
            message: format!("invalid hex: {}", e),
        }])
    })?;

    let codec = match salt {
        Some(salt) => IdentifierCodec::new(secret, &salt),
        None => IdentifierCodec::from_secret(secret),
    };
    codec.map_err(ConfigError::Codec)
}
