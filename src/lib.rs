// ABOUTME: Library root for dockrun - Docker daemon client for build, push and run.
// ABOUTME: The main binary is in main.rs.

pub mod client;
pub mod config;
pub mod error;
pub mod images;
pub mod lifecycle;
pub mod output;
pub mod runtime;
pub mod translate;
pub mod types;

pub use client::DockerClient;
pub use error::{Error, ErrorKind, Operation, Result};
pub use lifecycle::{ExecutionMode, RunOutcome, RunRequest};
