//! Best-effort removal of template-only directories

use std::io;
use std::path::Path;
use tokio::fs;
use tokio::task::JoinHandle;

/// A directory that could not be removed
#[derive(Debug)]
pub struct RemovalFailure {
    /// Path as listed by the caller, relative to the project root
    pub dir: String,
    pub error: io::Error,
}

/// Recursively remove each listed directory under `root_dir`
///
/// All removals run concurrently and every one is awaited, so a failure in
/// one never stops the others. Missing paths count as removed. Failures are
/// returned rather than raised; the caller decides how to report them.
pub async fn remove_directories(root_dir: &Path, dirs: &[&str]) -> Vec<RemovalFailure> {
    let tasks = dirs
        .iter()
        .map(|dir| {
            let path = root_dir.join(dir);
            let handle = tokio::spawn(async move { remove_forcefully(&path).await });
            (dir.to_string(), handle)
        })
        .collect();

    collect_failures(tasks).await
}

/// Await every removal task, in the caller's order, keeping each failure
/// paired with its directory even when the task itself died
async fn collect_failures(
    tasks: Vec<(String, JoinHandle<io::Result<()>>)>,
) -> Vec<RemovalFailure> {
    let mut failures = Vec::new();

    for (dir, handle) in tasks {
        let error = match handle.await {
            Ok(Ok(())) => continue,
            Ok(Err(error)) => error,
            Err(join_error) => io::Error::other(join_error),
        };
        failures.push(RemovalFailure { dir, error });
    }

    failures
}

/// Remove a path like `rm -rf`: directories recursively, files directly,
/// and nothing at all if it does not exist
async fn remove_forcefully(path: &Path) -> io::Result<()> {
    let metadata = match fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    };

    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
