//! Runtime profiles for the two supported Netlify deployment targets
//!
//! Each profile is a fixed table: which template files get staged, which
//! dependencies are dropped from `package.json`, and which scripts are
//! injected. The tables are known when the template is published, so they
//! live here as constants rather than in a config file.

use std::fmt;

/// Name of the template subdirectory inside a generated project
pub const TEMPLATE_DIR: &str = "remix.init";

/// Directories that only make sense in the template repository itself
pub const TEMPLATE_ONLY_DIRS: &[&str] = &[".github"];

/// Deployment runtime targeted by the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Runtime {
    /// Netlify Edge Functions (the primary runtime)
    Edge,
    /// Netlify Functions (the serverless alternate)
    Functions,
}

impl Runtime {
    pub fn display_name(&self) -> &'static str {
        match self {
            Runtime::Edge => "Netlify Edge Functions",
            Runtime::Functions => "Netlify Functions",
        }
    }

    /// Whether this is the primary (edge) runtime
    pub fn is_edge(&self) -> bool {
        matches!(self, Runtime::Edge)
    }

    /// The fixed profile for this runtime
    pub fn profile(&self) -> &'static RuntimeProfile {
        match self {
            Runtime::Edge => &EDGE_PROFILE,
            Runtime::Functions => &FUNCTIONS_PROFILE,
        }
    }
}

impl From<bool> for Runtime {
    fn from(use_edge: bool) -> Self {
        if use_edge {
            Runtime::Edge
        } else {
            Runtime::Functions
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A template file copied into the project root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileCopy {
    /// Source path relative to the template directory
    pub source: &'static str,

    /// Destination path relative to the project root (defaults to source)
    pub dest: Option<&'static str>,
}

impl FileCopy {
    /// Copy a file to the same relative path
    pub const fn same(source: &'static str) -> Self {
        Self { source, dest: None }
    }

    /// Copy a file under a different name
    pub const fn renamed(source: &'static str, dest: &'static str) -> Self {
        Self {
            source,
            dest: Some(dest),
        }
    }

    /// Get the destination path (falls back to source if dest not specified)
    pub fn destination(&self) -> &'static str {
        self.dest.unwrap_or(self.source)
    }
}

/// Everything a runtime needs applied to a freshly generated project
#[derive(Debug)]
pub struct RuntimeProfile {
    pub runtime: Runtime,

    /// Template files staged into the project root, in copy order
    pub files: &'static [FileCopy],

    /// Directories created alongside the copy
    pub directories: &'static [&'static str],

    /// Dependency keys removed from package.json
    pub excluded_dependencies: &'static [&'static str],

    /// Script entries merged into package.json (name, command)
    pub scripts: &'static [(&'static str, &'static str)],
}

impl RuntimeProfile {
    pub fn excludes(&self, dependency: &str) -> bool {
        self.excluded_dependencies.contains(&dependency)
    }
}

pub static EDGE_PROFILE: RuntimeProfile = RuntimeProfile {
    runtime: Runtime::Edge,
    files: &[
        FileCopy::renamed("README-edge.md", "README.md"),
        FileCopy::renamed("netlify-edge.toml", "netlify.toml"),
        FileCopy::same("server.ts"),
        FileCopy::same("remix.config.js"),
        FileCopy::renamed("vscode.json", ".vscode/settings.json"),
    ],
    directories: &[".vscode"],
    excluded_dependencies: &[
        "@netlify/functions",
        "@netlify/remix-adapter",
        "shx",
        "source-map-support",
    ],
    // Same as the start script under Netlify Edge
    scripts: &[(
        "dev",
        "remix dev --manual -c \"ntl dev --framework=#static\"",
    )],
};

pub static FUNCTIONS_PROFILE: RuntimeProfile = RuntimeProfile {
    runtime: Runtime::Functions,
    files: &[
        FileCopy::same("README.md"),
        FileCopy::same("netlify.toml"),
        FileCopy::same(".redirects"),
    ],
    directories: &[],
    excluded_dependencies: &[
        "@netlify/edge-functions",
        "@netlify/remix-edge-adapter",
        "@netlify/remix-runtime",
    ],
    scripts: &[
        ("build", "npm run redirects:enable && remix build"),
        ("dev", "npm run redirects:disable && remix dev"),
        ("redirects:enable", "shx cp .redirects public/_redirects"),
        ("redirects:disable", "shx rm -f public/_redirects"),
    ],
};
