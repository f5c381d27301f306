//! Strict copying of template files into the project root

use crate::profile::FileCopy;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Copy template files from `template_dir` into `root_dir`, in order
///
/// Files are copied byte-for-byte. The first failure aborts the whole copy:
/// a missing template file is a packaging defect, and files copied before
/// it are left in place.
pub async fn copy_files(
    files: &[FileCopy],
    template_dir: &Path,
    root_dir: &Path,
) -> Result<Vec<String>> {
    let mut copied_files = Vec::with_capacity(files.len());

    for file in files {
        let source_path = template_dir.join(file.source);
        let target_path = root_dir.join(file.destination());

        // Ensure parent directories exist
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::copy(&source_path, &target_path).await.with_context(|| {
            format!(
                "Failed to copy template file {} to {}",
                source_path.display(),
                target_path.display()
            )
        })?;

        copied_files.push(file.destination().to_string());
    }

    Ok(copied_files)
}
