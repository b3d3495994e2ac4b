//! `tokenid` command-line tool.
//!
//! Encodes, decodes and validates opaque tokens with the configured secret,
//! and fetches URLs through the resilient client.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::json;

use tokenid::client::{build_http_client, RequestOverrides, ResilientClient};
use tokenid::config::{self, TokenIdConfig};
use tokenid::observability::logging;

const USER_AGENT: &str = concat!("tokenid/", env!("CARGO_PKG_VERSION"));

#[derive(Parser)]
#[command(name = "tokenid")]
#[command(about = "Opaque token codec and resilient HTTP client", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a row id as an opaque token
    Encode {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Decode an opaque token back to its row id
    Decode { token: String },
    /// Check that a token was minted by this secret, in canonical form
    Validate { token: String },
    /// GET a URL through the resilient client
    Fetch {
        url: String,
        /// Whole-call budget in seconds (0 = no deadline)
        #[arg(long)]
        timeout: Option<u64>,
        /// Maximum attempts
        #[arg(long)]
        attempts: Option<u32>,
        /// Delay before the second attempt, in seconds
        #[arg(long)]
        delay: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => TokenIdConfig::default(),
    };

    logging::init(&config.observability)?;

    tracing::debug!(
        config_file = ?cli.config,
        max_attempts = config.client.max_attempts,
        request_timeout_secs = config.client.request_timeout_secs,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Encode { id } => {
            let codec = config::build_codec(&config.codec)?;
            let token = codec.encode_checked(id)?;
            print_json(&json!({ "id": id, "token": token }))?;
        }
        Commands::Decode { token } => {
            let codec = config::build_codec(&config.codec)?;
            let id = codec.decode(&token)?;
            print_json(&json!({ "token": token, "id": id }))?;
        }
        Commands::Validate { token } => {
            let codec = config::build_codec(&config.codec)?;
            let valid = codec.validate(&token);
            print_json(&json!({ "token": token, "valid": valid }))?;
        }
        Commands::Fetch {
            url,
            timeout,
            attempts,
            delay,
        } => {
            let http = build_http_client(USER_AGENT, config.client.attempt_timeout())?;
            let client = ResilientClient::new(http, config.client.retry_settings());

            let mut overrides = RequestOverrides {
                request_timeout_secs: timeout,
                max_attempts: attempts,
                ..RequestOverrides::default()
            };
            if let Some(delay) = delay {
                overrides.base_retry_delay = Some(Duration::try_from_secs_f64(delay)?);
            }

            let request = client.transport().get(url.as_str()).build()?;
            let response = client.request(&request, &overrides).await?;

            let status = response.status().as_u16();
            let body = response.text().await?;
            print_json(&json!({ "url": url, "status": status, "body": body }))?;
        }
    }

    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
