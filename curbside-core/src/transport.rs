//! Transport failures shared by every external collaborator.

use thiserror::Error;

/// Failure talking to a remote service.
///
/// Collaborator errors wrap this type so callers can tell transport problems
/// apart from domain outcomes such as "no route".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or the connection failed.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Description from the HTTP client.
        message: String,
    },
    /// The service did not answer within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout in whole seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Description from the HTTP client.
        message: String,
    },
    /// The service reported an application-level error.
    #[error("service error {code}: {message}")]
    Service {
        /// Service status code.
        code: String,
        /// Message from the service.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse response: {message}")]
    Parse {
        /// Decoder error message.
        message: String,
    },
}
