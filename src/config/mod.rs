//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → TokenIdConfig (validated, immutable)
//!
//! master secret (environment only)
//!     → loader.rs::build_codec
//!     → IdentifierCodec
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Secrets are never read from or written to config files

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{build_codec, build_codec_with_secret, load_config, parse_config, ConfigError};
pub use schema::{ClientConfig, CodecConfig, ObservabilityConfig, TokenIdConfig};
pub use validation::{validate_config, ValidationError};
