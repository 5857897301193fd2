// ABOUTME: Application-wide error types for dockrun.
// ABOUTME: Every failure a caller sees, with a kind for programmatic handling.

use crate::runtime::ConnectError;
use crate::translate::TranslateError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The daemon call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Start,
    Wait,
    Remove,
    Build,
    Push,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "create container",
            Operation::Start => "start container",
            Operation::Wait => "wait for container",
            Operation::Remove => "remove container",
            Operation::Build => "build image",
            Operation::Push => "push image",
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    MalformedSpec(#[from] TranslateError),

    #[error("image not found: {0}")]
    ImageNotFound(String),

    #[error("failed to {operation}: {message}")]
    DaemonOperationFailed { operation: Operation, message: String },

    #[error(transparent)]
    Connection(#[from] ConnectError),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    MalformedPortSpec,
    MalformedLinkSpec,
    MalformedBindingSpec,
    ImageNotFound,
    DaemonOperationFailed,
    Connection,
    Config,
    Io,
}

impl Error {
    pub(crate) fn daemon(operation: Operation, source: impl fmt::Display) -> Self {
        Error::DaemonOperationFailed {
            operation,
            message: source.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::MalformedSpec(e) => match e {
                TranslateError::MalformedPortSpec { .. } => ErrorKind::MalformedPortSpec,
                TranslateError::MalformedLinkSpec { .. } => ErrorKind::MalformedLinkSpec,
                TranslateError::MalformedBindingSpec { .. } => ErrorKind::MalformedBindingSpec,
            },
            Error::ImageNotFound(_) => ErrorKind::ImageNotFound,
            Error::DaemonOperationFailed { .. } => ErrorKind::DaemonOperationFailed,
            Error::Connection(_) => ErrorKind::Connection,
            Error::ConfigNotFound(_)
            | Error::MissingEnvVar(_)
            | Error::InvalidConfig(_)
            | Error::Yaml(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// The failed daemon call, if this is a daemon failure.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::DaemonOperationFailed { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_errors_keep_their_kind() {
        let err = Error::from(TranslateError::MalformedLinkSpec {
            spec: "a:b:c".to_string(),
            reason: "too many colons".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::MalformedLinkSpec);
        assert!(err.to_string().contains("a:b:c"));
    }

    #[test]
    fn daemon_errors_name_the_operation() {
        let err = Error::daemon(Operation::Start, "port is already allocated");
        assert_eq!(err.kind(), ErrorKind::DaemonOperationFailed);
        assert_eq!(err.operation(), Some(Operation::Start));
        assert_eq!(
            err.to_string(),
            "failed to start container: port is already allocated"
        );
    }
}
