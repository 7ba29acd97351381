//! Shared HTTP plumbing for the service adapters.
//!
//! Every adapter owns one [`reqwest::Client`] built from an
//! [`HttpServiceConfig`] and maps client failures onto
//! [`TransportError`] the same way.

use std::time::Duration;

use curbside_core::TransportError;
use reqwest::Client;
use thiserror::Error;
use url::Url;

/// Default user agent for outgoing requests.
///
/// Public services such as Nominatim reject anonymous clients, so every
/// request identifies itself.
pub const DEFAULT_USER_AGENT: &str = "curbside/0.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Failure building an HTTP adapter.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The base URL does not parse.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
}

/// Connection settings for one remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServiceConfig {
    /// Base URL, e.g. `"https://router.project-osrm.org"`.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl HttpServiceConfig {
    /// Configuration for `base_url` with default timeout and user agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Join `path` onto the base URL without doubling slashes.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Parse the joined endpoint for `path` as a [`Url`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::InvalidBaseUrl`] when the result is not an
    /// absolute URL.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, ClientBuildError> {
        let joined = self.endpoint(path);
        Url::parse(&joined).map_err(|source| ClientBuildError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    /// Build a client honouring the timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::HttpClient`] when the TLS backend or
    /// client settings are rejected.
    pub fn build_client(&self) -> Result<Client, ClientBuildError> {
        Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)
    }

    /// Map a client failure for `url` onto [`TransportError`].
    #[must_use]
    pub fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return TransportError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        if error.is_decode() {
            return TransportError::Parse {
                message: error.to_string(),
            };
        }

        TransportError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}
