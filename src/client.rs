// ABOUTME: Client factory binding an immutable connection config to a runtime.
// ABOUTME: Entry point for build, push and run.

use crate::error::Result;
use crate::images;
use crate::lifecycle::{self, RunOutcome, RunRequest};
use crate::runtime::{BollardRuntime, ConnectionConfig, ContainerOps, ImageOps, RegistryCredentials};
use std::io::Write;
use std::path::Path;

/// A daemon client. Cheap to share: nothing in it changes after creation.
pub struct DockerClient<R = BollardRuntime> {
    config: ConnectionConfig,
    runtime: R,
}

impl DockerClient<BollardRuntime> {
    /// Bind `config` to a bollard client. No network I/O happens here.
    pub fn create(config: ConnectionConfig) -> Result<Self> {
        let runtime = BollardRuntime::connect(&config)?;
        Ok(Self { config, runtime })
    }

    /// Shorthand for [`DockerClient::create`] from loose settings.
    ///
    /// An empty URL selects the local daemon; credentials are attached as given.
    pub fn connect(url: &str, username: &str, password: &str, email: &str) -> Result<Self> {
        let credentials = RegistryCredentials::new(username, password, email);
        Self::create(ConnectionConfig::new(Some(url), credentials))
    }
}

impl<R> DockerClient<R> {
    /// Use an already constructed runtime, e.g. a test double.
    pub fn with_runtime(config: ConnectionConfig, runtime: R) -> Self {
        Self { config, runtime }
    }

    pub fn connection(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }
}

impl<R: ContainerOps> DockerClient<R> {
    pub async fn run(&self, request: &RunRequest) -> Result<RunOutcome> {
        lifecycle::run(&self.runtime, request).await
    }
}

impl<R: ImageOps> DockerClient<R> {
    pub async fn build_image(
        &self,
        context: &Path,
        tag: &str,
        out: &mut (dyn Write + Send),
    ) -> Result<()> {
        images::build_image(&self.runtime, context, tag, out).await
    }

    pub async fn push_image(&self, tag: &str, out: &mut (dyn Write + Send)) -> Result<()> {
        images::push_image(&self.runtime, tag, out).await
    }
}
