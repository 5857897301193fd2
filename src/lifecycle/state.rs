// ABOUTME: Container state marker types for the type state pattern.
// ABOUTME: Zero-sized types enforce valid lifecycle transitions at compile time.

/// Created but not started.
/// Available actions: `start()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Created;

/// Running.
/// Available actions: `wait()`, `detach()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Started;

/// Exited; the container still exists on the daemon.
/// Available actions: `remove()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Exited;
