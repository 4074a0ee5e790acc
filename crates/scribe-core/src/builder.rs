//! Build trigger — runs the static-site generator.
//!
//! Invokes the fixed command `hugo --minify` in a caller-supplied working
//! directory and waits for it to finish. Child output is discarded; the
//! only observable outcome is the exit status. No timeout is enforced and
//! no mutual exclusion prevents overlapping builds in the same directory —
//! callers are expected to self-limit.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::info;

use crate::error::BuildError;

/// The static-site generator invocation.
const BUILD_PROGRAM: &str = "hugo";
const BUILD_ARGS: &[&str] = &["--minify"];

/// Run the build command with `working_dir` as its working directory.
///
/// Returns `true` iff the process exited with status 0.
///
/// # Errors
///
/// Returns [`BuildError::Spawn`] if the process cannot be started at all
/// (missing binary, invalid working directory).
pub async fn run(working_dir: &Path) -> Result<bool, BuildError> {
    info!(dir = %working_dir.display(), "starting site build");

    let status = Command::new(BUILD_PROGRAM)
        .args(BUILD_ARGS)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|source| BuildError::Spawn { source })?;

    let success = status.success();
    info!(dir = %working_dir.display(), success, "site build finished");
    Ok(success)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_working_directory_fails_to_spawn() {
        let dir = TempDir::new().unwrap();
        let result = run(&dir.path().join("does-not-exist")).await;
        assert!(matches!(result, Err(BuildError::Spawn { .. })));
    }
}
