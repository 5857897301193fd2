// ABOUTME: Declarative run request and its translation into a container spec.
// ABOUTME: All validation and parsing happens here, before any daemon call.

use crate::error::{Error, Result};
use crate::runtime::{ContainerSpec, HostSpec};
use crate::translate;
use crate::types::ImageRef;
use std::collections::BTreeMap;

/// What happens after the container starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Return the handle without waiting.
    Detached,
    /// Wait for exit, then remove the container.
    AutoRemove,
    /// Wait for exit and leave the container in place.
    #[default]
    ForegroundWait,
}

impl ExecutionMode {
    /// Resolve the user-facing flags; they are mutually exclusive.
    pub fn from_flags(detached: bool, auto_remove: bool) -> Result<Self> {
        match (detached, auto_remove) {
            (true, true) => Err(Error::InvalidArgument(
                "cannot set both detached and auto-remove".to_string(),
            )),
            (true, false) => Ok(ExecutionMode::Detached),
            (false, true) => Ok(ExecutionMode::AutoRemove),
            (false, false) => Ok(ExecutionMode::ForegroundWait),
        }
    }
}

/// Everything needed to run one container.
///
/// Map keys are unique by construction; list fields keep their order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    pub image: String,
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub detached: bool,
    pub auto_remove: bool,
    /// Variable name to value.
    pub env: BTreeMap<String, String>,
    /// Container port spec (`80`, `53/udp`) to host binding (`8080`, `127.0.0.1:8080`).
    pub ports: BTreeMap<String, String>,
    /// Host path to container path.
    pub volumes: BTreeMap<String, String>,
    pub volumes_from: Vec<String>,
    /// `name` or `name:alias`.
    pub links: Vec<String>,
    pub dns: Vec<String>,
    pub dns_search: Vec<String>,
}

impl RunRequest {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn detached(mut self, detached: bool) -> Self {
        self.detached = detached;
        self
    }

    pub fn auto_remove(mut self, auto_remove: bool) -> Self {
        self.auto_remove = auto_remove;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn port(mut self, container: impl Into<String>, host: impl Into<String>) -> Self {
        self.ports.insert(container.into(), host.into());
        self
    }

    pub fn volume(mut self, host: impl Into<String>, container: impl Into<String>) -> Self {
        self.volumes.insert(host.into(), container.into());
        self
    }

    pub fn volumes_from(mut self, container: impl Into<String>) -> Self {
        self.volumes_from.push(container.into());
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.links.push(link.into());
        self
    }

    pub fn dns(mut self, server: impl Into<String>) -> Self {
        self.dns.push(server.into());
        self
    }

    pub fn dns_search(mut self, domain: impl Into<String>) -> Self {
        self.dns_search.push(domain.into());
        self
    }

    pub fn mode(&self) -> Result<ExecutionMode> {
        ExecutionMode::from_flags(self.detached, self.auto_remove)
    }

    /// Check preconditions and translate every parameter.
    ///
    /// Nothing here talks to the daemon, so a malformed request never leaves
    /// anything behind.
    pub fn prepare(&self) -> Result<(ContainerSpec, ExecutionMode)> {
        if self.image.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "image tag cannot be empty".to_string(),
            ));
        }
        let mode = self.mode()?;
        let image = self.image.trim();
        ImageRef::parse(image)
            .map_err(|e| Error::InvalidArgument(format!("{}: {:?}", e, self.image)))?;

        let host = HostSpec {
            binds: translate::binds(&self.volumes),
            volumes_from: translate::volumes_from(&self.volumes_from),
            links: translate::links(&self.links)?,
            port_bindings: translate::port_bindings(&self.ports)?,
            dns: self.dns.clone(),
            dns_search: self.dns_search.clone(),
        };

        let spec = ContainerSpec {
            image: image.to_string(),
            name: non_blank(&self.name),
            hostname: non_blank(&self.hostname),
            env: translate::environment(&self.env),
            exposed_ports: translate::exposed_ports(&self.ports)?,
            host,
        };

        Ok((spec, mode))
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
