// ABOUTME: Image build and push with tag validation and error wrapping.
// ABOUTME: Daemon progress is relayed to the caller's writer as it streams in.

use crate::error::{Error, Operation, Result};
use crate::runtime::ImageOps;
use crate::types::ImageRef;
use std::io::Write;
use std::path::Path;

fn parse_tag(tag: &str) -> Result<ImageRef> {
    ImageRef::parse(tag).map_err(|e| Error::InvalidArgument(e.to_string()))
}

/// Build the image in `context` and tag it.
///
/// Any failure, whether reading the context, building, or relaying output,
/// is reported as a single build failure carrying the underlying message.
pub async fn build_image<R: ImageOps + ?Sized>(
    runtime: &R,
    context: &Path,
    tag: &str,
    out: &mut (dyn Write + Send),
) -> Result<()> {
    let tag = parse_tag(tag)?;
    tracing::info!(%tag, context = %context.display(), "building image");

    runtime
        .build_image(context, &tag, out)
        .await
        .map_err(|e| Error::daemon(Operation::Build, e))?;

    tracing::info!(%tag, "image built");
    Ok(())
}

/// Push a tagged image to its registry.
///
/// Digest references are refused: the daemon pushes by repository and tag,
/// and without a tag it would push every local tag of the repository.
pub async fn push_image<R: ImageOps + ?Sized>(
    runtime: &R,
    tag: &str,
    out: &mut (dyn Write + Send),
) -> Result<()> {
    let tag = parse_tag(tag)?;
    if let Some(digest) = tag.digest() {
        return Err(Error::InvalidArgument(format!(
            "cannot push by digest ({digest}); push a tag instead"
        )));
    }
    tracing::info!(%tag, "pushing image");

    runtime
        .push_image(&tag, out)
        .await
        .map_err(|e| Error::daemon(Operation::Push, e))?;

    tracing::info!(%tag, "image pushed");
    Ok(())
}
