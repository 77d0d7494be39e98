use std::error::Error as _;
use std::fmt;

/// Errors that stop a request from producing a `ChatResponse`.
///
/// Each variant's `Display` text starts with a fixed marker ("timeout",
/// "unable to resolve host", "connection refused") so that user-facing
/// messages can be picked by matching on the description alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connect, read or overall request deadline exceeded.
    Timeout(String),
    /// DNS lookup for the backend host failed.
    HostUnresolvable(String),
    /// The host answered but nothing listens on the port.
    ConnectionRefused(String),
    /// Any other connectivity failure.
    Network(String),
    /// Backend answered with a non-2xx HTTP status.
    Server { status: u16, body: String },
    /// Body was not a valid response envelope.
    Decode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Timeout(msg) => write!(f, "timeout: {msg}"),
            TransportError::HostUnresolvable(msg) => write!(f, "unable to resolve host: {msg}"),
            TransportError::ConnectionRefused(msg) => write!(f, "connection refused: {msg}"),
            TransportError::Network(msg) => write!(f, "network unreachable: {msg}"),
            TransportError::Server { status, body } => {
                write!(f, "server error (HTTP {status}): {body}")
            }
            TransportError::Decode(msg) => write!(f, "invalid response body: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Flattens an error and all of its sources into one line.
///
/// reqwest keeps the interesting part (`Connection refused (os error 111)`,
/// `failed to lookup address information`) a few levels down the chain.
fn chain_description(err: &reqwest::Error) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let detail = chain_description(&err);
        let lowered = detail.to_lowercase();

        if err.is_timeout() || lowered.contains("timed out") {
            TransportError::Timeout(detail)
        } else if err.is_decode() {
            TransportError::Decode(detail)
        } else if lowered.contains("dns error")
            || lowered.contains("failed to lookup address")
            || lowered.contains("name or service not known")
        {
            TransportError::HostUnresolvable(detail)
        } else if lowered.contains("connection refused") {
            TransportError::ConnectionRefused(detail)
        } else if let Some(status) = err.status() {
            TransportError::Server {
                status: status.as_u16(),
                body: detail,
            }
        } else {
            TransportError::Network(detail)
        }
    }
}
