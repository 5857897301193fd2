// ABOUTME: In-memory daemon implementing the runtime traits for orchestration tests.
// ABOUTME: Records calls in order and fails on demand.

use async_trait::async_trait;
use dockrun::runtime::{
    ContainerError, ContainerOps, ContainerSpec, ImageError, ImageOps,
};
use dockrun::types::{ContainerId, ImageRef};
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CONTAINER_ID: &str = "4f2a9c01";

#[derive(Debug, Clone)]
pub enum Call {
    Create(ContainerSpec),
    Start(ContainerId),
    Wait(ContainerId),
    Remove { id: ContainerId, force: bool },
    Build { context: PathBuf, tag: String },
    Push { tag: String },
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::Create(_) => "create",
            Call::Start(_) => "start",
            Call::Wait(_) => "wait",
            Call::Remove { .. } => "remove",
            Call::Build { .. } => "build",
            Call::Push { .. } => "push",
        }
    }
}

#[derive(Default)]
pub struct SpyDaemon {
    calls: Mutex<Vec<Call>>,
    missing_image: bool,
    missing_container: Option<String>,
    start_error: Option<String>,
    wait_error: Option<String>,
    remove_error: Option<String>,
    exit_code: i64,
    output: Vec<String>,
    build_error: Option<String>,
    push_error: Option<String>,
}

impl SpyDaemon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create reports the image as absent.
    pub fn missing_image(mut self) -> Self {
        self.missing_image = true;
        self
    }

    /// Create reports a referenced container (volumes-from, link) as absent.
    pub fn missing_container(mut self, name: &str) -> Self {
        self.missing_container = Some(name.to_string());
        self
    }

    pub fn fail_start(mut self, message: &str) -> Self {
        self.start_error = Some(message.to_string());
        self
    }

    pub fn fail_wait(mut self, message: &str) -> Self {
        self.wait_error = Some(message.to_string());
        self
    }

    pub fn fail_remove(mut self, message: &str) -> Self {
        self.remove_error = Some(message.to_string());
        self
    }

    pub fn exit_code(mut self, code: i64) -> Self {
        self.exit_code = code;
        self
    }

    /// Lines streamed by build and push.
    pub fn output(mut self, lines: &[&str]) -> Self {
        self.output = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn fail_build(mut self, message: &str) -> Self {
        self.build_error = Some(message.to_string());
        self
    }

    pub fn fail_push(mut self, message: &str) -> Self {
        self.push_error = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::name).collect()
    }

    /// The spec passed to the single create call.
    pub fn created_spec(&self) -> ContainerSpec {
        self.calls()
            .into_iter()
            .find_map(|call| match call {
                Call::Create(spec) => Some(spec),
                _ => None,
            })
            .expect("no create call recorded")
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn relay(&self, out: &mut (dyn Write + Send)) -> Result<(), ImageError> {
        for line in &self.output {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl ContainerOps for SpyDaemon {
    async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerId, ContainerError> {
        self.record(Call::Create(spec.clone()));
        if self.missing_image {
            return Err(ContainerError::ImageNotFound(spec.image.clone()));
        }
        if let Some(name) = &self.missing_container {
            return Err(ContainerError::NotFound(format!("No such container: {name}")));
        }
        Ok(ContainerId::new(CONTAINER_ID))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.record(Call::Start(id.clone()));
        match &self.start_error {
            Some(message) => Err(ContainerError::Runtime(message.clone())),
            None => Ok(()),
        }
    }

    async fn wait_container(&self, id: &ContainerId) -> Result<i64, ContainerError> {
        self.record(Call::Wait(id.clone()));
        match &self.wait_error {
            Some(message) => Err(ContainerError::Runtime(message.clone())),
            None => Ok(self.exit_code),
        }
    }

    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<(), ContainerError> {
        self.record(Call::Remove {
            id: id.clone(),
            force,
        });
        match &self.remove_error {
            Some(message) => Err(ContainerError::Runtime(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ImageOps for SpyDaemon {
    async fn build_image(
        &self,
        context: &Path,
        tag: &ImageRef,
        out: &mut (dyn Write + Send),
    ) -> Result<(), ImageError> {
        self.record(Call::Build {
            context: context.to_path_buf(),
            tag: tag.to_string(),
        });
        if let Some(message) = &self.build_error {
            return Err(ImageError::BuildFailed(message.clone()));
        }
        self.relay(out)
    }

    async fn push_image(
        &self,
        tag: &ImageRef,
        out: &mut (dyn Write + Send),
    ) -> Result<(), ImageError> {
        self.record(Call::Push {
            tag: tag.to_string(),
        });
        if let Some(message) = &self.push_error {
            return Err(ImageError::PushFailed(message.clone()));
        }
        self.relay(out)
    }
}
