//! Client configuration.
//!
//! A `ClientConfig` is validated once when built and is immutable afterwards.
//! Each instance owns its credential, so several differently-configured
//! clients can coexist in one process.

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;
use url::Url;

use crate::endpoint::parse_base_url;
use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://host.io/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_USER_AGENT: &str = concat!("hostio-rs/", env!("CARGO_PKG_VERSION"));

pub const ENV_TOKEN: &str = "HOSTIO_TOKEN";
pub const ENV_BASE_URL: &str = "HOSTIO_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "HOSTIO_TIMEOUT_SECS";

/// Validated settings for a `HostIoClient`.
#[derive(Clone)]
pub struct ClientConfig {
    token: String,
    base_url: Url,
    timeout: Duration,
    user_agent: String,
    http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    pub fn builder(token: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_client: None,
        }
    }

    /// Read `HOSTIO_TOKEN`, `HOSTIO_BASE_URL` and `HOSTIO_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_TOKEN)
            .ok_or_else(|| Error::InvalidConfiguration(format!("{ENV_TOKEN} is not set")))?;
        let mut builder = Self::builder(token);
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::InvalidConfiguration(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {raw:?}"))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub(crate) fn http_client(&self) -> Option<&reqwest::Client> {
        self.http_client.as_ref()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("custom_http_client", &self.http_client.is_some())
            .finish()
    }
}

/// Builder for [`ClientConfig`].
pub struct ClientConfigBuilder {
    token: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    http_client: Option<reqwest::Client>,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Per-request timeout covering connect, send and body read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS roots, pooling).
    ///
    /// The configured timeout and user agent are still sent with every request.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let token = self.token.trim().to_string();
        if token.is_empty() {
            return Err(Error::InvalidConfiguration("API token must not be empty".to_string()));
        }
        if HeaderValue::from_str(&format!("Bearer {token}")).is_err() {
            return Err(Error::InvalidConfiguration(
                "API token contains characters not allowed in a header".to_string(),
            ));
        }
        if HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(Error::InvalidConfiguration(
                "user agent contains characters not allowed in a header".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfiguration("timeout must be non-zero".to_string()));
        }
        let base_url = parse_base_url(&self.base_url)?;

        Ok(ClientConfig {
            token,
            base_url,
            timeout: self.timeout,
            user_agent: self.user_agent,
            http_client: self.http_client,
        })
    }
}
