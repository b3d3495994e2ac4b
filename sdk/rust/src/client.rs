use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use tokenid::client::{
    build_http_client, ClientError, RequestOverrides, ResilientClient, RetrySettings,
    DEFAULT_ATTEMPT_TIMEOUT,
};

pub const DEFAULT_BASE_URL: &str = "https://localhost:5000/";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const USER_AGENT: &str = concat!("tokenid-sdk/", env!("CARGO_PKG_VERSION"));

/// Handle of a stored token, as returned by the service on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenId {
    /// Opaque token id in UUID format.
    pub token_id: String,
    /// Expiry time (RFC 3339).
    pub expires_at: String,
    /// Token lifetime in seconds.
    pub token_expires_seconds: u64,
}

/// Error body returned by the service for rejected requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub timestamp: Option<f64>,
}

#[derive(Debug, Error)]
pub enum SdkError {
    /// Plain-http base URL without debug mode.
    #[error("Transmission protocol is not protected, use https: {0}")]
    InsecureTransport(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The service rejected the token id (HTTP 400).
    #[error("Token validation failed: {} ({})", .0.message, .0.error_code)]
    TokenValidation(ErrorBody),

    /// No live token with this id (HTTP 404).
    #[error("Token not found: {} ({})", .0.message, .0.error_code)]
    TokenNotFound(ErrorBody),

    /// Any other non-success status.
    #[error("Token service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client-wide options.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API version path segment.
    pub api_version: String,
    /// Default timeout and retry settings for every call.
    pub settings: RetrySettings,
    /// Connect and response budget of a single attempt.
    pub attempt_timeout: Duration,
    /// Allow plain-http base URLs.
    pub debug: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            settings: RetrySettings::default(),
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            debug: false,
        }
    }
}

/// Token service client.
pub struct TokenClient {
    client: ResilientClient<reqwest::Client>,
    base_url: Url,
    api_version: String,
}

impl TokenClient {
    /// Create a client for the service at `base_url`.
    ///
    /// Fails with [`SdkError::InsecureTransport`] for non-https URLs unless
    /// `options.debug` is set.
    pub fn new(base_url: &str, options: ClientOptions) -> Result<Self, SdkError> {
        let mut base_url = Url::parse(base_url)?;
        if !options.debug && base_url.scheme() != "https" {
            return Err(SdkError::InsecureTransport(base_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = build_http_client(USER_AGENT, options.attempt_timeout)
            .map_err(ClientError::Request)?;

        Ok(Self {
            client: ResilientClient::new(http, options.settings),
            base_url,
            api_version: options.api_version,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Store a token; returns its opaque id and expiry.
    pub async fn add_token(
        &self,
        token: &serde_json::Value,
        overrides: &RequestOverrides,
    ) -> Result<TokenId, SdkError> {
        let request = self
            .client
            .transport()
            .post(self.tokens_url(None)?)
            .json(token)
            .build()?;

        let response = self.client.request(&request, overrides).await?;
        parse_response(response).await
    }

    /// Fetch a stored token by its opaque id.
    pub async fn get_token(
        &self,
        token_id: &str,
        overrides: &RequestOverrides,
    ) -> Result<serde_json::Value, SdkError> {
        let request = self
            .client
            .transport()
            .get(self.tokens_url(Some(token_id))?)
            .build()?;

        let response = self.client.request(&request, overrides).await?;
        parse_response(response).await
    }

    fn tokens_url(&self, token_id: Option<&str>) -> Result<Url, SdkError> {
        let mut url = self.base_url.join(&format!("{}/tokens/", self.api_version))?;
        if let Some(token_id) = token_id {
            url.path_segments_mut()
                .map_err(|_| SdkError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
                .pop_if_empty()
                .push(token_id);
        }
        Ok(url)
    }
}

impl std::fmt::Debug for TokenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("settings", self.client.defaults())
            .finish()
    }
}

async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SdkError> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        return Ok(serde_json::from_str(&text)?);
    }

    let error_body = serde_json::from_str::<ErrorBody>(&text).ok();
    match (status, error_body) {
        (StatusCode::BAD_REQUEST, Some(body)) => Err(SdkError::TokenValidation(body)),
        (StatusCode::NOT_FOUND, Some(body)) => Err(SdkError::TokenNotFound(body)),
        _ => Err(SdkError::Status {
            status: status.as_u16(),
            body: text,
        }),
    }
}
