// ABOUTME: Runtime connection error types with SNAFU pattern.
// ABOUTME: Raised while binding a connection config to a daemon client.

use snafu::Snafu;

/// Failure to set up a daemon client. No network I/O has happened yet.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConnectError {
    #[snafu(display(
        "unsupported daemon endpoint {url:?} (expected unix://, tcp:// or http://)"
    ))]
    UnsupportedScheme { url: String },

    #[snafu(display("failed to configure daemon client for {endpoint}: {source}"))]
    Client {
        endpoint: String,
        source: bollard::errors::Error,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectErrorKind {
    /// The endpoint URL uses a scheme this client cannot speak.
    UnsupportedScheme,
    /// bollard rejected the endpoint.
    ClientSetup,
}

impl ConnectError {
    pub fn kind(&self) -> ConnectErrorKind {
        match self {
            ConnectError::UnsupportedScheme { .. } => ConnectErrorKind::UnsupportedScheme,
            ConnectError::Client { .. } => ConnectErrorKind::ClientSetup,
        }
    }
}
