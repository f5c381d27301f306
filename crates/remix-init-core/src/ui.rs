//! User interaction seam for the initializer
//!
//! The core never prints or reads from the terminal itself. The binary
//! passes an implementation of this trait (the cliclack one from the `tui`
//! module), and tests pass a scripted one.

use crate::profile::Runtime;
use anyhow::Result;

pub trait InitUi {
    /// Ask the user to pick one runtime from `choices`, blocking until answered
    fn select_runtime(&self, prompt: &str, choices: &[Runtime]) -> Result<Runtime>;

    /// Progress message
    fn info(&self, message: &str);

    /// Completed step
    fn success(&self, message: &str);

    /// Something went wrong but the run continues
    fn warning(&self, message: &str);
}
