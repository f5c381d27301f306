//! Deciding between Netlify Edge Functions and Netlify Functions

use crate::profile::Runtime;
use crate::ui::InitUi;
use anyhow::Result;
use clap::{Args, Command, CommandFactory, Parser};
use std::ffi::OsString;

/// Prompt shown when no runtime flag was passed
pub const RUNTIME_PROMPT: &str = "Run your Remix site with:";

/// Prompt options, in display order
pub const RUNTIME_CHOICES: [Runtime; 2] = [Runtime::Functions, Runtime::Edge];

/// Invocation flags selecting the runtime
///
/// Each flag overrides the other and itself, so repeats are accepted, the
/// last one wins, and `requested` never sees a conflict.
#[derive(Args, Debug, Clone, Default)]
pub struct RuntimeFlags {
    /// Explicitly use Netlify Edge Functions to serve this Remix site
    #[arg(
        long = "netlify-edge",
        overrides_with_all = ["netlify_edge", "no_netlify_edge"]
    )]
    pub netlify_edge: bool,

    /// Explicitly do NOT use Netlify Edge Functions to serve this Remix site - use Serverless Functions instead
    #[arg(
        long = "no-netlify-edge",
        overrides_with_all = ["netlify_edge", "no_netlify_edge"]
    )]
    pub no_netlify_edge: bool,
}

impl RuntimeFlags {
    /// The runtime asked for on the command line, if any
    pub fn requested(&self) -> Option<Runtime> {
        match (self.netlify_edge, self.no_netlify_edge) {
            (true, _) => Some(Runtime::Edge),
            (false, true) => Some(Runtime::Functions),
            (false, false) => None,
        }
    }
}

/// Resolve the runtime: an explicit flag wins, otherwise ask
pub fn resolve_runtime(requested: Option<Runtime>, ui: &impl InitUi) -> Result<Runtime> {
    match requested {
        Some(runtime) => Ok(runtime),
        None => ui.select_runtime(RUNTIME_PROMPT, &RUNTIME_CHOICES),
    }
}

/// A flag the command understands
struct KnownFlag {
    long: Option<String>,
    short: Option<char>,
    takes_value: bool,
}

fn known_flags(command: &Command) -> Vec<KnownFlag> {
    let mut flags: Vec<KnownFlag> = command
        .get_arguments()
        .filter(|arg| !arg.is_positional())
        .map(|arg| KnownFlag {
            long: arg.get_long().map(str::to_string),
            short: arg.get_short(),
            takes_value: arg.get_action().takes_values(),
        })
        .collect();

    // clap only generates these when the command is built
    flags.push(KnownFlag {
        long: Some("help".to_string()),
        short: Some('h'),
        takes_value: false,
    });
    if command.get_version().is_some() {
        flags.push(KnownFlag {
            long: Some("version".to_string()),
            short: Some('V'),
            takes_value: false,
        });
    }

    flags
}

/// Drop every argument `command` does not define
///
/// The first argument (the binary name) is always kept. Values that follow a
/// known option are kept with it; positional arguments and anything after
/// `--` belong to the outer command and are dropped.
pub fn permissive_args<I, T>(command: &Command, args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let flags = known_flags(command);
    let mut args = args.into_iter().map(Into::into);
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            continue;
        };

        if text == "--" {
            break;
        }

        let flag = if let Some(long) = text.strip_prefix("--") {
            let (name, inline_value) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            flags
                .iter()
                .find(|f| f.long.as_deref() == Some(name))
                .filter(|f| f.takes_value || !inline_value)
                .map(|f| (f, inline_value))
        } else if let Some(short) = text.strip_prefix('-') {
            let mut chars = short.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => flags
                    .iter()
                    .find(|f| f.short == Some(c))
                    .map(|f| (f, false)),
                _ => None,
            }
        } else {
            None
        };

        let Some((flag, inline_value)) = flag else {
            continue;
        };

        let takes_next = flag.takes_value && !inline_value;
        kept.push(arg);
        if takes_next {
            if let Some(value) = args.next() {
                kept.push(value);
            }
        }
    }

    kept
}

/// Parse `P` from `args`, ignoring arguments it does not define
///
/// A repeated option is not an error: the last occurrence wins.
pub fn parse_permissive<P, I, T>(args: I) -> P
where
    P: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut command = P::command().args_override_self(true);
    let args = permissive_args(&command, args);
    let matches = command
        .try_get_matches_from_mut(args)
        .unwrap_or_else(|e| e.exit());
    P::from_arg_matches(&matches).unwrap_or_else(|e| e.format(&mut command).exit())
}
