// ABOUTME: Bollard-based container runtime implementation.
// ABOUTME: Talks to Docker (or Podman's Docker-compatible API) over a Unix socket or HTTP.

use super::build_context::pack_context_blocking;
use super::connection::{ConnectionConfig, Endpoint};
use super::error::{ClientSnafu, ConnectError};
use crate::runtime::traits::{
    ContainerError, ContainerOps, ContainerSpec, HostSpec, ImageError, ImageOps,
    RegistryCredentials,
};
use crate::translate::join_volumes_from;
use crate::types::{ContainerId, ImageRef};
use async_trait::async_trait;
use bollard::Docker;
use bollard::auth::DockerCredentials;
use bollard::models::{ContainerCreateBody, HostConfig, PortBinding};
use bollard::query_parameters::{
    BuildImageOptions, CreateContainerOptions, PushImageOptions, RemoveContainerOptions,
    StartContainerOptions, WaitContainerOptions,
};
use bytes::Bytes;
use futures::StreamExt;
use snafu::ResultExt;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

/// A 404 from create means the image is missing only when the daemon says so;
/// containers named by volumes-from or links also come back as 404.
fn map_container_create_error(e: bollard::errors::Error, image: &str) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 && names_missing_image(message, image) => {
            ContainerError::ImageNotFound(message.clone())
        }
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => ContainerError::AlreadyExists(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn names_missing_image(message: &str, image: &str) -> bool {
    !message.contains("No such container")
        && (message.contains("No such image") || message.contains(image))
}

fn map_container_not_found_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

fn host_config(host: &HostSpec) -> HostConfig {
    let port_bindings: HashMap<String, Option<Vec<PortBinding>>> = host
        .port_bindings
        .iter()
        .map(|(port, bindings)| {
            let bindings = bindings
                .iter()
                .map(|b| PortBinding {
                    host_ip: Some(b.host_ip.clone()),
                    host_port: Some(b.host_port.to_string()),
                })
                .collect();
            (port.to_string(), Some(bindings))
        })
        .collect();

    HostConfig {
        binds: non_empty(host.binds.iter().map(ToString::to_string).collect()),
        volumes_from: non_empty(host.volumes_from.clone()),
        links: non_empty(host.links.iter().map(ToString::to_string).collect()),
        port_bindings: if port_bindings.is_empty() {
            None
        } else {
            Some(port_bindings)
        },
        dns: non_empty(host.dns.clone()),
        dns_search: non_empty(host.dns_search.clone()),
        ..Default::default()
    }
}

fn docker_credentials(creds: &RegistryCredentials, image: &ImageRef) -> DockerCredentials {
    DockerCredentials {
        username: Some(creds.username.clone()),
        password: Some(creds.password.clone()),
        email: Some(creds.email.clone()),
        serveraddress: image.registry().map(str::to_string),
        ..Default::default()
    }
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Container runtime implementation using bollard.
pub struct BollardRuntime {
    client: Docker,
    credentials: RegistryCredentials,
}

impl BollardRuntime {
    /// Wrap an existing bollard client.
    pub fn new(client: Docker, credentials: RegistryCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Bind a connection config to a bollard client.
    ///
    /// bollard connects lazily, so this does no network I/O; an unreachable
    /// daemon surfaces on the first operation.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, ConnectError> {
        let endpoint = config.endpoint()?;
        let timeout = config.request_timeout();
        tracing::debug!(%endpoint, ?timeout, "configuring daemon client");

        let client = match &endpoint {
            Endpoint::LocalDefault => Docker::connect_with_local_defaults()
                .map(|docker| docker.with_timeout(timeout)),
            Endpoint::Unix(path) => {
                Docker::connect_with_unix(path, timeout.as_secs(), bollard::API_DEFAULT_VERSION)
            }
            Endpoint::Http(addr) => {
                Docker::connect_with_http(addr, timeout.as_secs(), bollard::API_DEFAULT_VERSION)
            }
        }
        .context(ClientSnafu {
            endpoint: endpoint.to_string(),
        })?;

        Ok(Self::new(client, config.credentials().clone()))
    }
}

#[async_trait]
impl ContainerOps for BollardRuntime {
    async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerId, ContainerError> {
        tracing::debug!(
            image = %spec.image,
            name = spec.name.as_deref().unwrap_or(""),
            volumes_from = %join_volumes_from(&spec.host.volumes_from),
            "creating container"
        );

        let body = ContainerCreateBody {
            image: Some(spec.image.clone()),
            hostname: spec.hostname.clone(),
            env: non_empty(spec.env.clone()),
            exposed_ports: non_empty(spec.exposed_ports.iter().map(ToString::to_string).collect()),
            host_config: Some(host_config(&spec.host)),
            ..Default::default()
        };

        let opts = CreateContainerOptions {
            name: spec.name.clone(),
            ..Default::default()
        };

        let response = self
            .client
            .create_container(Some(opts), body)
            .await
            .map_err(|e| map_container_create_error(e, &spec.image))?;

        for warning in &response.warnings {
            tracing::warn!(container = %response.id, "daemon warning: {}", warning);
        }

        Ok(ContainerId::new(response.id))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        tracing::debug!(container = %id, "starting container");
        self.client
            .start_container(id.as_str(), None::<StartContainerOptions>)
            .await
            .map_err(map_container_not_found_error)
    }

    async fn wait_container(&self, id: &ContainerId) -> Result<i64, ContainerError> {
        tracing::debug!(container = %id, "waiting for container");
        let mut stream = self
            .client
            .wait_container(id.as_str(), None::<WaitContainerOptions>);

        // bollard reports a non-zero exit as an error carrying the code.
        match stream.next().await {
            Some(Ok(response)) => Ok(response.status_code),
            Some(Err(bollard::errors::Error::DockerContainerWaitError { code, .. })) => Ok(code),
            Some(Err(e)) => Err(map_container_not_found_error(e)),
            None => Err(ContainerError::Runtime(format!(
                "wait on {} ended without an exit status",
                id
            ))),
        }
    }

    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<(), ContainerError> {
        tracing::debug!(container = %id, force, "removing container");
        let opts = RemoveContainerOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_container(id.as_str(), Some(opts))
            .await
            .map_err(map_container_not_found_error)
    }
}

#[async_trait]
impl ImageOps for BollardRuntime {
    async fn build_image(
        &self,
        context: &Path,
        tag: &ImageRef,
        out: &mut (dyn Write + Send),
    ) -> Result<(), ImageError> {
        let archive = pack_context_blocking(context.to_path_buf()).await?;
        tracing::debug!(%tag, bytes = archive.len(), "sending build context");

        let opts = BuildImageOptions {
            t: Some(tag.to_string()),
            ..Default::default()
        };

        let mut stream =
            self.client
                .build_image(opts, None, Some(bollard::body_full(Bytes::from(archive))));

        while let Some(item) = stream.next().await {
            let info = item.map_err(|e| ImageError::BuildFailed(e.to_string()))?;
            if let Some(detail) = info.error_detail {
                return Err(ImageError::BuildFailed(detail.message.unwrap_or_default()));
            }
            if let Some(line) = info.stream {
                out.write_all(line.as_bytes())?;
            } else if let Some(status) = info.status {
                writeln!(out, "{}", status)?;
            }
        }

        out.flush()?;
        Ok(())
    }

    async fn push_image(
        &self,
        tag: &ImageRef,
        out: &mut (dyn Write + Send),
    ) -> Result<(), ImageError> {
        let repository = tag.repository();
        let opts = PushImageOptions {
            tag: tag.tag().map(str::to_string),
            ..Default::default()
        };
        let credentials = docker_credentials(&self.credentials, tag);

        let mut stream = self
            .client
            .push_image(&repository, Some(opts), Some(credentials));

        while let Some(item) = stream.next().await {
            let info = item.map_err(|e| ImageError::PushFailed(format!("{}: {}", tag, e)))?;
            if let Some(detail) = info.error_detail {
                return Err(ImageError::PushFailed(format!(
                    "{}: {}",
                    tag,
                    detail.message.unwrap_or_default()
                )));
            }
            if let Some(status) = info.status {
                writeln!(out, "{}", status)?;
            }
        }

        out.flush()?;
        Ok(())
    }
}
