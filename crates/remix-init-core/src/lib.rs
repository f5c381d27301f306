//! Remix Init Core - configures a freshly generated Remix project for Netlify
//!
//! A generated project ships a `remix.init/` directory holding the files for
//! both supported runtimes. This library picks one runtime, stages its files
//! into the project root, cleans up directories that only mattered in the
//! template repository, and rewrites `package.json` to match.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - File staging (`staging`) and manifest rewriting (`manifest`),
//!   driven by the fixed runtime tables in `profile`
//! - **Layer 2: Workflow Orchestration** - Runtime selection (`runtime`) and `init::run`,
//!   which talk to the user only through the `InitUi` trait
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use remix_init_core::{init, InitOptions, Runtime};
//!
//! let options = InitOptions::new("/path/to/my-remix-site");
//! init::run(&options, Some(Runtime::Edge), &my_ui).await?;
//! ```

pub mod init;
pub mod manifest;
pub mod profile;
pub mod runtime;
pub mod staging;
pub mod ui;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use init::InitOptions;
pub use manifest::{apply_edge_profile, apply_functions_profile, ManifestError, PackageJson};
pub use profile::{FileCopy, Runtime, RuntimeProfile, EDGE_PROFILE, FUNCTIONS_PROFILE};
pub use runtime::{resolve_runtime, RuntimeFlags};
pub use staging::{copy_files, remove_directories};
pub use ui::InitUi;

#[cfg(feature = "tui")]
pub use tui::run;
