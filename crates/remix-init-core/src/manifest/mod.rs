//! Project manifest (`package.json`) rewriting
//!
//! Each runtime has a fixed profile: dependencies it does not need are
//! dropped and its build/dev scripts are merged in. Load and save failures
//! are fatal for the run.

pub mod package;

use crate::profile::{EDGE_PROFILE, FUNCTIONS_PROFILE};
use std::path::Path;

pub use package::{
    apply_profile, merge_scripts, remove_unused_dependencies, ManifestError, PackageJson,
    PACKAGE_JSON,
};

/// Rewrite the manifest in `dir` for Netlify Edge Functions
pub async fn apply_edge_profile(dir: &Path) -> Result<(), ManifestError> {
    apply_profile(dir, &EDGE_PROFILE).await
}

/// Rewrite the manifest in `dir` for Netlify Functions
pub async fn apply_functions_profile(dir: &Path) -> Result<(), ManifestError> {
    apply_profile(dir, &FUNCTIONS_PROFILE).await
}
