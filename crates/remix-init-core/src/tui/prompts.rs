//! Charm-style CLI prompts using cliclack

use crate::init::{self, InitOptions};
use crate::profile::Runtime;
use crate::ui::InitUi;
use anyhow::Result;

/// cliclack-backed implementation of [`InitUi`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CliclackUi;

impl InitUi for CliclackUi {
    fn select_runtime(&self, prompt: &str, choices: &[Runtime]) -> Result<Runtime> {
        let mut select = cliclack::select(prompt);
        for runtime in choices {
            select = select.item(*runtime, runtime.display_name(), "");
        }

        Ok(select.interact()?)
    }

    fn info(&self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn success(&self, message: &str) {
        let _ = cliclack::log::success(message);
    }

    fn warning(&self, message: &str) {
        let _ = cliclack::log::warning(message);
    }
}

/// Run the initializer with interactive prompts
pub async fn run(options: InitOptions, requested: Option<Runtime>) -> Result<()> {
    cliclack::intro("Netlify Remix template")?;

    let runtime = init::run(&options, requested, &CliclackUi).await?;

    cliclack::outro(format!(
        "Your Remix site is ready to run on {}",
        runtime.display_name()
    ))?;

    Ok(())
}
