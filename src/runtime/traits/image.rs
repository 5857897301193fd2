// ABOUTME: Image operations trait for container runtimes.
// ABOUTME: Build an image from a context directory and push it to a registry.

use crate::types::ImageRef;
use async_trait::async_trait;
use std::io::Write;
use std::path::Path;

/// Image operations. Progress output is relayed to `out` as it arrives.
#[async_trait]
pub trait ImageOps: Send + Sync {
    /// Build `context` (a directory containing a Dockerfile) and tag the result.
    async fn build_image(
        &self,
        context: &Path,
        tag: &ImageRef,
        out: &mut (dyn Write + Send),
    ) -> Result<(), ImageError>;

    /// Push a tagged image using the runtime's registry credentials.
    async fn push_image(
        &self,
        tag: &ImageRef,
        out: &mut (dyn Write + Send),
    ) -> Result<(), ImageError>;
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("failed to read build context {path}: {message}")]
    Context { path: String, message: String },

    #[error("build failed: {0}")]
    BuildFailed(String),

    #[error("push failed: {0}")]
    PushFailed(String),

    #[error("failed to relay output: {0}")]
    Output(#[from] std::io::Error),
}
