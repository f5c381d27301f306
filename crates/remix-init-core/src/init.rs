//! Orchestration of a single initializer run

use crate::manifest;
use crate::profile::{Runtime, RuntimeProfile, TEMPLATE_DIR, TEMPLATE_ONLY_DIRS};
use crate::runtime::resolve_runtime;
use crate::staging;
use crate::ui::InitUi;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Where the initializer works and what it cleans up
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Root of the generated project
    pub root_dir: PathBuf,

    /// Template subdirectory, relative to the root
    pub template_dir: PathBuf,

    /// Directories removed best-effort before anything else, relative to the root
    pub template_only_dirs: Vec<String>,
}

impl InitOptions {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            template_dir: PathBuf::from(TEMPLATE_DIR),
            template_only_dirs: TEMPLATE_ONLY_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Absolute location of the template files
    pub fn template_path(&self) -> PathBuf {
        self.root_dir.join(&self.template_dir)
    }
}

impl Default for InitOptions {
    fn default() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(current_dir)
    }
}

/// Configure the generated project for one runtime
///
/// 1. Remove template-only directories (failures are reported, not raised)
/// 2. Resolve the runtime from `requested` or by prompting
/// 3. Stage the runtime's template files
/// 4. Rewrite `package.json` for the runtime
///
/// Any error from steps 2-4 aborts the run. Nothing already written is
/// rolled back.
pub async fn run(
    options: &InitOptions,
    requested: Option<Runtime>,
    ui: &impl InitUi,
) -> Result<Runtime> {
    let dirs: Vec<&str> = options
        .template_only_dirs
        .iter()
        .map(String::as_str)
        .collect();
    let failures = staging::remove_directories(&options.root_dir, &dirs).await;
    if let Some(warning) = staging::removal_warning(&failures) {
        ui.warning(&warning);
    }

    let runtime = resolve_runtime(requested, ui)?;
    ui.info(&format!("Configuring for {}", runtime));

    let profile = runtime.profile();
    let copied = stage_files(options, profile).await?;
    ui.success(&format!("Copied {}", copied.join(", ")));

    manifest::apply_profile(&options.root_dir, profile)
        .await
        .context("Failed to update package.json")?;
    ui.success(&format!("Updated {}", manifest::PACKAGE_JSON));

    Ok(runtime)
}

/// Create the profile's directories while copying its files
///
/// Both must finish before the manifest is touched. The copy creates any
/// missing parent itself, so the two branches never depend on each other.
async fn stage_files(options: &InitOptions, profile: &RuntimeProfile) -> Result<Vec<String>> {
    let template_path = options.template_path();

    let (_, copied) = tokio::try_join!(
        create_directories(&options.root_dir, profile.directories),
        staging::copy_files(profile.files, &template_path, &options.root_dir),
    )?;

    Ok(copied)
}

async fn create_directories(root_dir: &Path, dirs: &[&str]) -> Result<()> {
    for dir in dirs {
        let path = root_dir.join(dir);
        fs::create_dir_all(&path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Answers the runtime prompt from a script and records everything shown
    #[derive(Default)]
    struct ScriptedUi {
        answer: Option<Runtime>,
        prompts: RefCell<Vec<String>>,
        infos: RefCell<Vec<String>>,
        warnings: RefCell<Vec<String>>,
    }

    impl ScriptedUi {
        fn answering(answer: Runtime) -> Self {
            Self {
                answer: Some(answer),
                ..Self::default()
            }
        }
    }

    impl InitUi for ScriptedUi {
        fn select_runtime(&self, prompt: &str, _choices: &[Runtime]) -> Result<Runtime> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.answer.context("prompt closed")
        }

        fn info(&self, message: &str) {
            self.infos.borrow_mut().push(message.to_string());
        }

        fn success(&self, _message: &str) {}

        fn warning(&self, message: &str) {
            self.warnings.borrow_mut().push(message.to_string());
        }
    }

    const PACKAGE: &str = r#"{
  "name": "remix-site",
  "private": true,
  "scripts": {
    "dev": "old",
    "start": "netlify serve"
  },
  "dependencies": {
    "@netlify/edge-functions": "^2.0.0",
    "@netlify/functions": "^1.4.0",
    "@netlify/remix-adapter": "^2.0.0",
    "@netlify/remix-edge-adapter": "^2.0.0",
    "@netlify/remix-runtime": "^2.0.0",
    "@remix-run/react": "^2.0.0",
    "shx": "^0.3.4",
    "source-map-support": "^0.5.21"
  },
  "engines": {
    "node": ">=18"
  }
}
"#;

    /// A freshly generated project with every template file present
    fn scaffold() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let template = root.path().join(TEMPLATE_DIR);
        std::fs::create_dir_all(&template).unwrap();
        for (name, content) in [
            ("README.md", "# Functions"),
            ("README-edge.md", "# Edge"),
            ("netlify.toml", "[build]\ncommand = \"remix build\""),
            ("netlify-edge.toml", "[build]\ncommand = \"remix vite:build\""),
            (".redirects", "/* /.netlify/functions/server 200"),
            ("server.ts", "export default {};"),
            ("remix.config.js", "module.exports = {};"),
            ("vscode.json", "{\"deno.enable\": true}"),
        ] {
            std::fs::write(template.join(name), content).unwrap();
        }
        std::fs::create_dir_all(root.path().join(".github/workflows")).unwrap();
        std::fs::write(root.path().join(".github/workflows/ci.yml"), "on: push").unwrap();
        std::fs::write(root.path().join(manifest::PACKAGE_JSON), PACKAGE).unwrap();
        root
    }

    fn read_manifest(root: &Path) -> serde_json::Value {
        let raw = std::fs::read_to_string(root.join(manifest::PACKAGE_JSON)).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    fn dependency_names(manifest: &serde_json::Value) -> Vec<String> {
        manifest["dependencies"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect()
    }

    #[tokio::test]
    async fn test_functions_runtime_from_flag() {
        let root = scaffold();
        let ui = ScriptedUi::default();

        let runtime = run(&InitOptions::new(root.path()), Some(Runtime::Functions), &ui)
            .await
            .unwrap();

        assert_eq!(runtime, Runtime::Functions);
        assert!(ui.prompts.borrow().is_empty());
        assert!(!root.path().join(".github").exists());
        assert_eq!(
            std::fs::read_to_string(root.path().join("README.md")).unwrap(),
            "# Functions"
        );
        assert!(root.path().join("netlify.toml").exists());
        assert!(root.path().join(".redirects").exists());
        assert!(!root.path().join("server.ts").exists());
        assert!(!root.path().join(".vscode").exists());

        let manifest = read_manifest(root.path());
        assert_eq!(
            dependency_names(&manifest),
            vec![
                "@netlify/functions",
                "@netlify/remix-adapter",
                "@remix-run/react",
                "shx",
                "source-map-support"
            ]
        );
        assert_eq!(
            manifest["scripts"],
            serde_json::json!({
                "dev": "npm run redirects:disable && remix dev",
                "start": "netlify serve",
                "build": "npm run redirects:enable && remix build",
                "redirects:enable": "shx cp .redirects public/_redirects",
                "redirects:disable": "shx rm -f public/_redirects"
            })
        );
        assert_eq!(manifest["name"], "remix-site");
        assert_eq!(manifest["private"], true);
        assert_eq!(manifest["engines"], serde_json::json!({"node": ">=18"}));
    }

    #[tokio::test]
    async fn test_edge_runtime_from_prompt() {
        let root = scaffold();
        let ui = ScriptedUi::answering(Runtime::Edge);

        let runtime = run(&InitOptions::new(root.path()), None, &ui)
            .await
            .unwrap();

        assert_eq!(runtime, Runtime::Edge);
        assert_eq!(*ui.prompts.borrow(), vec!["Run your Remix site with:"]);
        assert!(root.path().join(".vscode").is_dir());
        assert_eq!(
            std::fs::read_to_string(root.path().join(".vscode/settings.json")).unwrap(),
            "{\"deno.enable\": true}"
        );
        assert_eq!(
            std::fs::read_to_string(root.path().join("README.md")).unwrap(),
            "# Edge"
        );
        assert_eq!(
            std::fs::read_to_string(root.path().join("netlify.toml")).unwrap(),
            "[build]\ncommand = \"remix vite:build\""
        );
        assert!(root.path().join("server.ts").exists());
        assert!(root.path().join("remix.config.js").exists());
        assert!(!root.path().join(".redirects").exists());

        let manifest = read_manifest(root.path());
        let deps = dependency_names(&manifest);
        for excluded in [
            "@netlify/functions",
            "@netlify/remix-adapter",
            "shx",
            "source-map-support",
        ] {
            assert!(!deps.iter().any(|d| d == excluded));
        }
        assert_eq!(
            manifest["scripts"]["dev"],
            "remix dev --manual -c \"ntl dev --framework=#static\""
        );
        assert_eq!(manifest["scripts"]["start"], "netlify serve");
    }

    #[tokio::test]
    async fn test_runtime_from_flag_is_announced_once() {
        let root = scaffold();
        let ui = ScriptedUi::default();

        run(&InitOptions::new(root.path()), Some(Runtime::Edge), &ui)
            .await
            .unwrap();

        let announcements: Vec<String> = ui
            .infos
            .borrow()
            .iter()
            .filter(|m| m.contains(Runtime::Edge.display_name()))
            .cloned()
            .collect();
        assert_eq!(announcements, vec!["Configuring for Netlify Edge Functions"]);
    }

    #[tokio::test]
    async fn test_existing_vscode_directory_is_reused() {
        let root = scaffold();
        std::fs::create_dir_all(root.path().join(".vscode")).unwrap();

        run(&InitOptions::new(root.path()), Some(Runtime::Edge), &ScriptedUi::default())
            .await
            .unwrap();

        assert!(root.path().join(".vscode/settings.json").exists());
    }

    #[tokio::test]
    async fn test_missing_template_file_leaves_manifest_untouched() {
        let root = scaffold();
        std::fs::remove_file(root.path().join(TEMPLATE_DIR).join("server.ts")).unwrap();

        let err = run(&InitOptions::new(root.path()), Some(Runtime::Edge), &ScriptedUi::default())
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("server.ts"));
        assert_eq!(
            std::fs::read_to_string(root.path().join(manifest::PACKAGE_JSON)).unwrap(),
            PACKAGE
        );
    }

    #[tokio::test]
    async fn test_removal_failure_is_reported_and_run_continues() {
        let root = scaffold();
        let mut options = InitOptions::new(root.path());
        options.template_only_dirs = vec![".github".to_string(), "bad\0dir".to_string()];
        let ui = ScriptedUi::default();

        run(&options, Some(Runtime::Functions), &ui).await.unwrap();

        assert!(!root.path().join(".github").exists());
        assert_eq!(
            *ui.warnings.borrow(),
            vec!["Unable to remove folders bad\0dir. You can remove them manually."]
        );
        assert!(root.path().join(".redirects").exists());
    }

    #[tokio::test]
    async fn test_prompt_failure_aborts_before_staging() {
        let root = scaffold();

        let result = run(&InitOptions::new(root.path()), None, &ScriptedUi::default()).await;

        assert!(result.is_err());
        assert!(!root.path().join("netlify.toml").exists());
        assert_eq!(
            std::fs::read_to_string(root.path().join(manifest::PACKAGE_JSON)).unwrap(),
            PACKAGE
        );
    }

    #[tokio::test]
    async fn test_malformed_manifest_is_fatal() {
        let root = scaffold();
        std::fs::write(root.path().join(manifest::PACKAGE_JSON), "{ broken").unwrap();

        let err = run(
            &InitOptions::new(root.path()),
            Some(Runtime::Functions),
            &ScriptedUi::default(),
        )
        .await
        .unwrap_err();

        assert!(format!("{:#}", err).contains("package.json"));
    }
}
