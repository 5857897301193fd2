// ABOUTME: Result of a run: a detached handle or the container's exit status.
// ABOUTME: Display forms are what the CLI prints.

use crate::types::ContainerId;
use std::fmt;

/// Exit code reported by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus(i64);

impl ExitStatus {
    pub fn new(code: i64) -> Self {
        Self(code)
    }

    pub fn code(self) -> i64 {
        self.0
    }

    pub fn success(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exit status: {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Started and left running.
    Detached(ContainerId),
    /// Ran to completion.
    Exited(ExitStatus),
}

impl RunOutcome {
    pub fn container_id(&self) -> Option<&ContainerId> {
        match self {
            RunOutcome::Detached(id) => Some(id),
            RunOutcome::Exited(_) => None,
        }
    }

    pub fn exit_status(&self) -> Option<ExitStatus> {
        match self {
            RunOutcome::Detached(_) => None,
            RunOutcome::Exited(status) => Some(*status),
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Detached(id) => write!(f, "{}", id),
            RunOutcome::Exited(status) => write!(f, "{}", status),
        }
    }
}
