//! File staging for the generated project
//!
//! Two operations with different failure contracts:
//! - `copy_files` is strict: any failure aborts initialization
//! - `remove_directories` is best-effort: failures are collected and returned

pub mod cleanup;
pub mod copier;

pub use cleanup::{remove_directories, RemovalFailure};
pub use copier::copy_files;

/// Warning shown when some template-only directories survive cleanup
pub fn removal_warning(failures: &[RemovalFailure]) -> Option<String> {
    if failures.is_empty() {
        return None;
    }

    let dirs: Vec<&str> = failures.iter().map(|f| f.dir.as_str()).collect();
    Some(format!(
        "Unable to remove folders {}. You can remove them manually.",
        dirs.join(", ")
    ))
}
