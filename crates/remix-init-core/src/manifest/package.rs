//! `package.json` loading, rewriting and saving

use crate::profile::RuntimeProfile;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// File name of the manifest at the project root
pub const PACKAGE_JSON: &str = "package.json";

const DEPENDENCIES: &str = "dependencies";
const SCRIPTS: &str = "scripts";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("\"{field}\" in {} is not an object", path.display())]
    FieldNotAnObject { path: PathBuf, field: &'static str },

    #[error("Failed to serialize {}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Whitespace style of the file as it was read, reused when saving
#[derive(Debug, Clone, PartialEq, Eq)]
struct Format {
    indent: String,
    line_ending: &'static str,
    trailing_newline: bool,
}

impl Format {
    fn detect(raw: &str) -> Self {
        let indent = raw
            .lines()
            .nth(1)
            .map(|line| {
                line.chars()
                    .take_while(|c| *c == ' ' || *c == '\t')
                    .collect::<String>()
            })
            .filter(|indent| !indent.is_empty())
            .unwrap_or_else(|| "  ".to_string());

        Self {
            indent,
            line_ending: if raw.contains("\r\n") { "\r\n" } else { "\n" },
            trailing_newline: raw.ends_with('\n'),
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            line_ending: "\n",
            trailing_newline: true,
        }
    }
}

/// A loaded `package.json`, with fields kept in their original order
#[derive(Debug, Clone)]
pub struct PackageJson {
    path: PathBuf,
    content: Map<String, Value>,
    format: Format,
}

impl PackageJson {
    /// Load `package.json` from a project directory
    pub async fn load(dir: &Path) -> Result<Self, ManifestError> {
        let path = dir.join(PACKAGE_JSON);
        let raw = fs::read_to_string(&path)
            .await
            .map_err(|source| ManifestError::Read {
                path: path.clone(),
                source,
            })?;

        Self::parse(path, &raw)
    }

    fn parse(path: PathBuf, raw: &str) -> Result<Self, ManifestError> {
        // Editors on Windows like to prepend a byte-order mark; it is not written back
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
        let value: Value = serde_json::from_str(raw).map_err(|source| ManifestError::Parse {
            path: path.clone(),
            source,
        })?;

        let Value::Object(content) = value else {
            return Err(ManifestError::NotAnObject { path });
        };

        Ok(Self {
            path,
            content,
            format: Format::detect(raw),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &Map<String, Value> {
        &self.content
    }

    /// Rewrite dependencies and scripts for a runtime profile
    ///
    /// Every other top-level field, and the position of every field, is left
    /// untouched. A missing `dependencies` field stays missing; a missing
    /// `scripts` field is created.
    pub fn apply(&mut self, profile: &RuntimeProfile) -> Result<(), ManifestError> {
        let dependencies = self
            .mapping(DEPENDENCIES)?
            .map(|deps| remove_unused_dependencies(deps, profile.excluded_dependencies));
        if let Some(kept) = dependencies {
            self.content
                .insert(DEPENDENCIES.to_string(), Value::Object(kept));
        }

        let empty = Map::new();
        let scripts = merge_scripts(self.mapping(SCRIPTS)?.unwrap_or(&empty), profile.scripts);
        self.content
            .insert(SCRIPTS.to_string(), Value::Object(scripts));

        Ok(())
    }

    /// Write the manifest back to where it was loaded from
    pub async fn save(&self) -> Result<(), ManifestError> {
        let rendered = self.render()?;
        fs::write(&self.path, rendered)
            .await
            .map_err(|source| ManifestError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn render(&self) -> Result<String, ManifestError> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.format.indent.as_bytes());
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        self.content
            .serialize(&mut serializer)
            .map_err(|source| ManifestError::Serialize {
                path: self.path.clone(),
                source,
            })?;

        let mut rendered = String::from_utf8_lossy(&buffer).into_owned();
        if self.format.line_ending != "\n" {
            rendered = rendered.replace('\n', self.format.line_ending);
        }
        if self.format.trailing_newline {
            rendered.push_str(self.format.line_ending);
        }
        Ok(rendered)
    }

    /// Shallow presence check for a mapping field
    fn mapping(&self, field: &'static str) -> Result<Option<&Map<String, Value>>, ManifestError> {
        match self.content.get(field) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(ManifestError::FieldNotAnObject {
                path: self.path.clone(),
                field,
            }),
        }
    }
}

/// Copy of `dependencies` without the excluded keys, in original order
pub fn remove_unused_dependencies(
    dependencies: &Map<String, Value>,
    excluded: &[&str],
) -> Map<String, Value> {
    dependencies
        .iter()
        .filter(|(name, _)| !excluded.contains(&name.as_str()))
        .map(|(name, version)| (name.clone(), version.clone()))
        .collect()
}

/// Copy of `scripts` with the injected entries merged in
///
/// Injected names overwrite existing entries in place; new names are
/// appended in table order.
pub fn merge_scripts(
    scripts: &Map<String, Value>,
    injected: &[(&str, &str)],
) -> Map<String, Value> {
    let mut merged = scripts.clone();
    for (name, command) in injected {
        merged.insert(name.to_string(), Value::String(command.to_string()));
    }
    merged
}

/// Load, rewrite and save the manifest in `dir` for a profile
pub async fn apply_profile(dir: &Path, profile: &RuntimeProfile) -> Result<(), ManifestError> {
    let mut package = PackageJson::load(dir).await?;
    package.apply(profile)?;
    package.save().await
}
