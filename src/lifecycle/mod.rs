// ABOUTME: Container lifecycle orchestration: create, start, then wait, detach or remove.
// ABOUTME: Calls are strictly sequential; a failed start is compensated by removal.

mod container;
mod outcome;
mod request;
mod state;

pub use container::Container;
pub use outcome::{ExitStatus, RunOutcome};
pub use request::{ExecutionMode, RunRequest};
pub use state::{Created, Exited, Started};

use crate::error::Result;
use crate::runtime::ContainerOps;

/// Run a container to the disposition its execution mode asks for.
///
/// Preconditions and every translation are checked before the first daemon
/// call. After that the sequence is create, start, then:
///
/// - `Detached`: return the handle.
/// - `ForegroundWait`: wait and return the exit status; the container stays.
/// - `AutoRemove`: wait, remove, then return the exit status.
pub async fn run<R: ContainerOps + ?Sized>(runtime: &R, request: &RunRequest) -> Result<RunOutcome> {
    let (spec, mode) = request.prepare()?;
    tracing::debug!(image = %spec.image, ?mode, "running container");

    let container = Container::create(runtime, &spec).await?;
    let container = container.start(runtime).await?;

    match mode {
        ExecutionMode::Detached => Ok(RunOutcome::Detached(container.detach())),
        ExecutionMode::ForegroundWait => {
            let (_, status) = container.wait(runtime).await?;
            Ok(RunOutcome::Exited(status))
        }
        ExecutionMode::AutoRemove => {
            let (exited, status) = container.wait(runtime).await?;
            exited.remove(runtime).await?;
            Ok(RunOutcome::Exited(status))
        }
    }
}
