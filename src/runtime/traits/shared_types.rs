// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: ContainerSpec, HostSpec and RegistryCredentials.

use crate::translate::{BindMount, ExposedPort, Link, PortBindings};

/// Everything the daemon needs to create a container.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    /// Image to run.
    /// Image tag or id exactly as the caller gave it.
    pub image: String,
    /// Container name; the daemon picks one when absent.
    pub name: Option<String>,
    /// Host name inside the container.
    pub hostname: Option<String>,
    /// `KEY=VALUE` assignments.
    pub env: Vec<String>,
    /// Ports the container listens on.
    pub exposed_ports: Vec<ExposedPort>,
    /// Host-level settings.
    pub host: HostSpec,
}

/// Host-level settings: mounts, links, published ports and DNS.
#[derive(Debug, Clone, Default)]
pub struct HostSpec {
    pub binds: Vec<BindMount>,
    /// Containers to inherit volumes from, in order.
    pub volumes_from: Vec<String>,
    pub links: Vec<Link>,
    pub port_bindings: PortBindings,
    /// DNS server addresses, in order.
    pub dns: Vec<String>,
    /// DNS search domains, in order.
    pub dns_search: Vec<String>,
}

/// Registry credentials, passed through to the daemon unvalidated.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistryCredentials {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl RegistryCredentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Debug for RegistryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}
