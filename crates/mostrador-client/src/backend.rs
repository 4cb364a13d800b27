//! # Backend Handle
//!
//! HTTP client creation and configuration for the remote REST backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Backend Handle                                  │
//! │                                                                         │
//! │  Backoffice Startup                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BackendConfig::new(url) ← base URL, token, timeout                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Backend::new(config) ← builds one reqwest::Client                      │
//! │       │                                                                 │
//! │       ├──► backend.products().list()    GET {base}/products             │
//! │       └──► backend.categories().list()  GET {base}/categories           │
//! │                                                                         │
//! │  The client pools connections internally; cloning Backend is cheap     │
//! │  and every clone shares the same pool.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each call is awaited on its own. There is no retry, batching, or
//! backpressure: a call either succeeds or returns one [`ClientError`].

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::repository::category::CategoryRepository;
use crate::repository::product::ProductRepository;

/// Sent with every request.
const USER_AGENT: &str = concat!("mostrador-backoffice/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Configuration
// =============================================================================

/// Backend configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use mostrador_client::BackendConfig;
///
/// let config = BackendConfig::new("https://api.example.cl/v1")
///     .api_token("secret")
///     .timeout(Duration::from_secs(10));
/// assert_eq!(config.timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://api.example.cl/v1`.
    pub base_url: String,

    /// Sent as `Authorization: Bearer <token>` when present.
    pub api_token: Option<String>,

    /// Per-request timeout.
    /// Default: 15 seconds
    pub timeout: Duration,
}

impl BackendConfig {
    /// Creates a configuration for `base_url` with no token.
    pub fn new(base_url: impl Into<String>) -> Self {
        BackendConfig {
            base_url: base_url.into(),
            api_token: None,
            timeout: Duration::from_secs(15),
        }
    }

    /// Sets the bearer token.
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Backend
// =============================================================================

/// Handle to the remote backend providing repository access.
#[derive(Debug, Clone)]
pub struct Backend {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl Backend {
    /// Builds the HTTP client.
    ///
    /// ## Errors
    /// - [`ClientError::Config`] when the URL is not http(s) or the timeout is zero
    /// - [`ClientError::Transport`] when the TLS backend cannot start
    pub fn new(config: BackendConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "backend URL must start with http:// or https://, got {:?}",
                config.base_url
            )));
        }
        if config.timeout.is_zero() {
            return Err(ClientError::Config("timeout must be greater than zero".to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        let api_token = config.api_token.filter(|t| !t.trim().is_empty());

        info!(
            base_url = %base_url,
            timeout_secs = config.timeout.as_secs(),
            authenticated = api_token.is_some(),
            "Backend client created"
        );

        Ok(Backend {
            client,
            base_url,
            api_token,
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let products = backend.products().list().await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    /// Returns the category repository.
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET {base}/{path}` decoded as `T`.
    ///
    /// `what` names the payload in decode errors.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> ClientResult<T> {
        let url = self.url(path);
        let started = Instant::now();

        let mut request = self.client.get(&url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "Backend request rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                path: path.to_string(),
                body,
            });
        }

        let body = response.text().await?;
        debug!(
            %url,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Backend response received"
        );

        serde_json::from_str(&body).map_err(|e| ClientError::decode(what, e))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
