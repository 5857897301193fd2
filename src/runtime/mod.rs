// ABOUTME: Container runtime access: capability traits and the bollard binding.
// ABOUTME: Connection settings are resolved here; no I/O happens until first use.

mod bollard;
mod build_context;
mod connection;
mod error;
pub mod traits;

pub use self::bollard::BollardRuntime;
pub use build_context::pack_context;
pub use connection::{ConnectionConfig, DEFAULT_TIMEOUT, Endpoint};
pub use error::{ConnectError, ConnectErrorKind};
pub use traits::*;
