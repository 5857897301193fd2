// ABOUTME: A daemon container tracked through its lifecycle with the type state pattern.
// ABOUTME: Each transition consumes self; a failed start removes the container it created.

use super::outcome::ExitStatus;
use super::state::{Created, Exited, Started};
use crate::error::{Error, Operation, Result};
use crate::runtime::{ContainerError, ContainerOps, ContainerSpec};
use crate::types::ContainerId;
use std::marker::PhantomData;

/// A container owned by one run, parameterized by its current state.
#[derive(Debug)]
#[must_use = "a created container must be started or removed"]
pub struct Container<S> {
    id: ContainerId,
    _state: PhantomData<S>,
}

impl<S> Container<S> {
    fn transition<T>(self) -> Container<T> {
        Container {
            id: self.id,
            _state: PhantomData,
        }
    }

    pub fn id(&self) -> &ContainerId {
        &self.id
    }
}

// =============================================================================
// Absent -> Created
// =============================================================================

impl Container<Created> {
    /// Create a container.
    ///
    /// # Errors
    ///
    /// `ImageNotFound` if the image is not present locally (nothing is pulled),
    /// otherwise `DaemonOperationFailed`.
    pub async fn create<R: ContainerOps + ?Sized>(
        runtime: &R,
        spec: &ContainerSpec,
    ) -> Result<Self> {
        let id = runtime
            .create_container(spec)
            .await
            .map_err(|e| match e {
                ContainerError::ImageNotFound(message) => Error::ImageNotFound(message),
                other => Error::daemon(Operation::Create, other),
            })?;

        tracing::info!(container = %id, image = %spec.image, "container created");
        Ok(Container {
            id,
            _state: PhantomData,
        })
    }

    // =========================================================================
    // Created -> Started
    // =========================================================================

    /// Start the container.
    ///
    /// If the daemon refuses, the container is removed before the start error
    /// is returned. A failure of that removal is logged and otherwise ignored.
    pub async fn start<R: ContainerOps + ?Sized>(self, runtime: &R) -> Result<Container<Started>> {
        match runtime.start_container(&self.id).await {
            Ok(()) => {
                tracing::info!(container = %self.id, "container started");
                Ok(self.transition())
            }
            Err(start_error) => {
                tracing::debug!(container = %self.id, error = %start_error, "start failed, removing container");
                if let Err(e) = runtime.remove_container(&self.id, true).await {
                    tracing::warn!(
                        container = %self.id,
                        "failed to remove container after start failure: {}",
                        e
                    );
                }
                Err(Error::daemon(Operation::Start, start_error))
            }
        }
    }
}

// =============================================================================
// Started -> Exited | Detached
// =============================================================================

impl Container<Started> {
    /// Leave the container running and hand back its handle.
    pub fn detach(self) -> ContainerId {
        tracing::info!(container = %self.id, "detached");
        self.id
    }

    /// Block until the container exits. There is no timeout; drop the future
    /// to stop waiting.
    pub async fn wait<R: ContainerOps + ?Sized>(
        self,
        runtime: &R,
    ) -> Result<(Container<Exited>, ExitStatus)> {
        let code = runtime
            .wait_container(&self.id)
            .await
            .map_err(|e| Error::daemon(Operation::Wait, e))?;

        let status = ExitStatus::new(code);
        tracing::info!(container = %self.id, code, "container exited");
        Ok((self.transition(), status))
    }
}

// =============================================================================
// Exited -> Absent
// =============================================================================

impl Container<Exited> {
    pub async fn remove<R: ContainerOps + ?Sized>(self, runtime: &R) -> Result<()> {
        runtime
            .remove_container(&self.id, false)
            .await
            .map_err(|e| Error::daemon(Operation::Remove, e))?;
        tracing::info!(container = %self.id, "container removed");
        Ok(())
    }
}
