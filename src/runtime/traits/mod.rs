// ABOUTME: Composable capability traits for container runtimes.
// ABOUTME: Defines ContainerOps and ImageOps; FullRuntime is implemented for anything with both.

mod container;
mod image;
mod shared_types;

pub use container::{ContainerError, ContainerOps};
pub use image::{ImageError, ImageOps};
pub use shared_types::*;

/// A runtime that can both manage containers and build/push images.
pub trait FullRuntime: ContainerOps + ImageOps {}

impl<T: ContainerOps + ImageOps> FullRuntime for T {}
