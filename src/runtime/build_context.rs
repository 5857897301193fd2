// ABOUTME: Packs a build context directory into the tar archive the daemon expects.
// ABOUTME: Runs on the blocking pool so large contexts don't stall the executor.

use super::traits::ImageError;
use std::path::{Path, PathBuf};

/// Archive `dir` with paths relative to its root.
pub fn pack_context(dir: &Path) -> Result<Vec<u8>, ImageError> {
    let context_error = |message: String| ImageError::Context {
        path: dir.display().to_string(),
        message,
    };

    if !dir.is_dir() {
        return Err(context_error("not a directory".to_string()));
    }

    let mut ar = tar::Builder::new(Vec::new());
    ar.append_dir_all(".", dir)
        .map_err(|e| context_error(e.to_string()))?;
    ar.into_inner().map_err(|e| context_error(e.to_string()))
}

pub async fn pack_context_blocking(dir: PathBuf) -> Result<Vec<u8>, ImageError> {
    let path = dir.display().to_string();
    tokio::task::spawn_blocking(move || pack_context(&dir))
        .await
        .map_err(|e| ImageError::Context {
            path,
            message: e.to_string(),
        })?
}
