// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Container handles and image references shared by every layer.

mod id;
mod image_ref;

pub use id::ContainerId;
pub use image_ref::{ImageRef, ParseImageRefError};
