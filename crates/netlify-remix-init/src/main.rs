//! netlify-remix-init - Configures a generated Remix project for Netlify

use anyhow::Result;
use clap::Parser;
use remix_init_core::runtime::parse_permissive;
use remix_init_core::{InitOptions, RuntimeFlags};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "netlify-remix-init")]
#[command(about = "Configures a generated Remix project for Netlify Edge Functions or Netlify Functions")]
#[command(version)]
pub struct Args {
    /// Root of the generated project (defaults to the current directory)
    #[arg(long = "root-directory")]
    pub root_directory: Option<PathBuf>,

    /// Template subdirectory inside the project root (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    #[command(flatten)]
    pub runtime: RuntimeFlags,
}

impl From<Args> for InitOptions {
    fn from(args: Args) -> Self {
        let mut options = match args.root_directory {
            Some(root) => InitOptions::new(root),
            None => InitOptions::default(),
        };
        if let Some(template_dir) = args.template_dir {
            options.template_dir = template_dir;
        }
        options
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    // This runs inside a larger create command; flags we don't define are its business
    let args: Args = parse_permissive(std::env::args_os());
    let requested = args.runtime.requested();

    let result = remix_init_core::run(args.into(), requested).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
