//! Runtime selection
//!
//! This module provides:
//! - The `--netlify-edge` / `--no-netlify-edge` flag pair as one tri-state input
//! - Permissive argument filtering, since the initializer runs inside a larger
//!   command whose other flags are not its concern
//! - The interactive fallback when neither flag is given

pub mod selector;

pub use crate::profile::Runtime;
pub use selector::{
    parse_permissive, permissive_args, resolve_runtime, RuntimeFlags, RUNTIME_CHOICES,
    RUNTIME_PROMPT,
};
