// ABOUTME: Pure translators from user-supplied strings to typed request fragments.
// ABOUTME: None of these touch the daemon; failures are reported before any call.

mod binds;
mod env;
mod links;
mod ports;

pub use binds::{BindMount, binds, join_volumes_from, volumes_from};
pub use env::environment;
pub use links::{Link, links};
pub use ports::{
    DEFAULT_HOST_IP, ExposedPort, HostBinding, PortBindings, Protocol, exposed_ports,
    port_bindings,
};

/// Parse failures on user-supplied specs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("malformed port spec {spec:?}: {reason}")]
    MalformedPortSpec { spec: String, reason: String },

    #[error("malformed link spec {spec:?}: {reason}")]
    MalformedLinkSpec { spec: String, reason: String },

    #[error("malformed port binding {spec:?}: {reason}")]
    MalformedBindingSpec { spec: String, reason: String },
}

impl TranslateError {
    pub(crate) fn port(spec: &str, reason: impl Into<String>) -> Self {
        TranslateError::MalformedPortSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn link(spec: &str, reason: impl Into<String>) -> Self {
        TranslateError::MalformedLinkSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn binding(spec: &str, reason: impl Into<String>) -> Self {
        TranslateError::MalformedBindingSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}
