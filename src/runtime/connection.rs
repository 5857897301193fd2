// ABOUTME: Immutable connection settings for the daemon client.
// ABOUTME: Endpoint URL, registry credentials and request timeout.

use super::error::{ConnectError, UnsupportedSchemeSnafu};
use super::traits::RegistryCredentials;
use std::time::Duration;

/// Request timeout used when none is configured. Waits on long-running
/// containers must not be cut short, so this is effectively unbounded.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Where the daemon lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Platform default: `DOCKER_HOST`, else the local socket.
    LocalDefault,
    /// Unix domain socket path.
    Unix(String),
    /// Plain HTTP address, e.g. `tcp://10.0.0.5:2375`.
    Http(String),
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::LocalDefault => write!(f, "local daemon"),
            Endpoint::Unix(path) => write!(f, "unix://{}", path),
            Endpoint::Http(addr) => write!(f, "{}", addr),
        }
    }
}

/// Connection settings, fixed once the client is created.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    url: Option<String>,
    credentials: RegistryCredentials,
    timeout: Duration,
}

impl ConnectionConfig {
    /// An empty or absent URL selects the local daemon.
    pub fn new(url: Option<&str>, credentials: RegistryCredentials) -> Self {
        Self {
            url: url
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string),
            credentials,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The local daemon with no registry credentials.
    pub fn local() -> Self {
        Self::new(None, RegistryCredentials::default())
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn credentials(&self) -> &RegistryCredentials {
        &self.credentials
    }

    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve the URL into an endpoint without touching the network.
    pub fn endpoint(&self) -> Result<Endpoint, ConnectError> {
        let Some(url) = self.url.as_deref() else {
            return Ok(Endpoint::LocalDefault);
        };

        if let Some(path) = url.strip_prefix("unix://") {
            Ok(Endpoint::Unix(path.to_string()))
        } else if url.starts_with('/') {
            Ok(Endpoint::Unix(url.to_string()))
        } else if url.starts_with("tcp://") || url.starts_with("http://") {
            Ok(Endpoint::Http(url.to_string()))
        } else {
            UnsupportedSchemeSnafu { url }.fail()
        }
    }
}
