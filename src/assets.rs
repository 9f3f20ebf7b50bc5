//! Reader for NuGet `project.assets.json` manifests.
//!
//! The assets file is parsed with document order preserved: target framework
//! fallback picks the first framework the document declares, and bare-name
//! collisions resolve to the first entry encountered. Both behaviors depend
//! on `serde_json`'s `preserve_order` feature.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use miette::{NamedSource, SourceSpan};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{AssetsParseError, NugraphError};

/// One resolved entry under a target framework, keyed `"Name/Version"`
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    key: String,
    dependencies: Vec<String>,
}

impl ResolvedEntry {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name portion of the key, before the first `/`.
    ///
    /// A key with an empty name segment is kept whole rather than indexed
    /// under the empty string.
    #[must_use]
    pub fn bare_name(&self) -> &str {
        match self.key.split_once('/') {
            Some((name, _)) if !name.is_empty() => name,
            _ => &self.key,
        }
    }

    /// Bare names of the entries this one depends on, in document order
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }
}

/// Resolved package set for one target framework
#[derive(Debug, Clone)]
pub struct TargetFramework {
    tfm: String,
    entries: Vec<ResolvedEntry>,
}

impl TargetFramework {
    #[must_use]
    pub fn tfm(&self) -> &str {
        &self.tfm
    }

    #[must_use]
    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    /// Bare-name lookup for this framework's resolved entries.
    ///
    /// First occurrence wins when two keys share a bare name; resolution is
    /// document-order dependent. This is an accepted limitation of the
    /// format, not something the index tries to repair.
    #[must_use]
    pub fn name_index(&self) -> NameIndex<'_> {
        let mut by_name: HashMap<String, &str> = HashMap::new();
        for entry in &self.entries {
            by_name
                .entry(entry.bare_name().to_lowercase())
                .or_insert_with(|| entry.key());
        }
        NameIndex {
            by_name,
            target: self,
        }
    }
}

/// Bare dependency name → fully-qualified key lookup, scoped to one target
/// framework because the same name may resolve differently elsewhere
#[derive(Debug)]
pub struct NameIndex<'a> {
    by_name: HashMap<String, &'a str>,
    target: &'a TargetFramework,
}

impl<'a> NameIndex<'a> {
    /// Resolve a bare dependency name to its fully-qualified key.
    ///
    /// Misses fall back to scanning the resolved keys for a `"name/"`
    /// prefix. `None` means the dependency has no resolvable entry; callers
    /// skip it silently rather than treating it as an error.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&'a str> {
        let lower = name.to_lowercase();
        if let Some(key) = self.by_name.get(&lower).copied() {
            return Some(key);
        }

        let prefix = format!("{lower}/");
        self.target
            .entries
            .iter()
            .map(ResolvedEntry::key)
            .find(|key| key.to_lowercase().starts_with(&prefix))
    }
}

/// Direct project-level dependencies and project references declared for one
/// framework under the manifest's `project.frameworks` section
#[derive(Debug, Clone)]
pub struct FrameworkSection {
    tfm: String,
    dependencies: Vec<String>,
    project_references: Vec<String>,
}

impl FrameworkSection {
    #[must_use]
    pub fn tfm(&self) -> &str {
        &self.tfm
    }

    /// Bare names of the project's own direct dependencies
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Relative paths of referenced projects, as written in the manifest
    #[must_use]
    pub fn project_references(&self) -> &[String] {
        &self.project_references
    }
}

/// Parsed `project.assets.json` manifest
#[derive(Debug, Clone)]
pub struct AssetsManifest {
    path: PathBuf,
    targets: Vec<TargetFramework>,
    frameworks: Vec<FrameworkSection>,
    project_references: Vec<String>,
    project_name: Option<String>,
}

impl AssetsManifest {
    /// Read and parse an assets file from disk
    pub fn load(path: &Path) -> Result<Self, NugraphError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NugraphError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        Self::parse(path, &content)
    }

    /// Parse assets JSON that has already been read
    pub fn parse(path: &Path, content: &str) -> Result<Self, NugraphError> {
        let document: ManifestDocument = serde_json::from_str(content).map_err(|e| {
            let span = error_span(content, &e);
            NugraphError::AssetsParseError(Box::new(AssetsParseError {
                file: path.display().to_string(),
                source_code: NamedSource::new(path.display().to_string(), content.to_string()),
                span,
                source: e,
            }))
        })?;

        let targets_map = document
            .targets
            .ok_or_else(|| NugraphError::ManifestMalformed {
                path: path.to_path_buf(),
            })?;

        let targets = targets_map
            .into_iter()
            .map(|(tfm, entries)| {
                let entries = parse_entries(&entries);
                TargetFramework { tfm, entries }
            })
            .collect();

        let project = document.project.unwrap_or_default();

        let frameworks = project
            .frameworks
            .unwrap_or_default()
            .into_iter()
            .map(|(tfm, section)| {
                let dependencies = object_keys(section.get("dependencies"));
                let project_references = object_keys(section.get("projectReferences"));
                FrameworkSection {
                    tfm,
                    dependencies,
                    project_references,
                }
            })
            .collect();

        let project_references = project
            .project_references
            .map(|references| references.keys().cloned().collect())
            .unwrap_or_default();

        let project_name = project.restore.and_then(|restore| restore.project_name);

        Ok(Self {
            path: path.to_path_buf(),
            targets,
            frameworks,
            project_references,
            project_name,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the manifest, used in rendered graph titles
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }

    /// Target frameworks in document order
    #[must_use]
    pub fn targets(&self) -> &[TargetFramework] {
        &self.targets
    }

    /// Project name recorded by restore, when present
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// Pick the target framework for a run.
    ///
    /// Exact match first; else a case-insensitive prefix that matches
    /// exactly one declared framework; else the first framework in the
    /// document. A manifest declaring zero frameworks cannot be analyzed.
    pub fn select_target(&self, requested: Option<&str>) -> Result<&TargetFramework, NugraphError> {
        if self.targets.is_empty() {
            return Err(NugraphError::EnvironmentNotFound {
                path: self.path.clone(),
            });
        }

        if let Some(requested) = requested {
            if let Some(target) = self.targets.iter().find(|t| t.tfm == requested) {
                return Ok(target);
            }

            let needle = requested.to_lowercase();
            let mut prefixed = self
                .targets
                .iter()
                .filter(|t| t.tfm.to_lowercase().starts_with(&needle));
            if let (Some(only), None) = (prefixed.next(), prefixed.next()) {
                return Ok(only);
            }
        }

        Ok(&self.targets[0])
    }

    /// The `project.frameworks` section matching a target framework, if any
    #[must_use]
    pub fn framework_section(&self, tfm: &str) -> Option<&FrameworkSection> {
        self.frameworks
            .iter()
            .find(|section| section.tfm.eq_ignore_ascii_case(tfm))
    }

    /// Every declared project-reference path: per-framework sections first,
    /// then the legacy top-level list. Duplicates are left in; the builder's
    /// visited set makes re-discovery idempotent.
    #[must_use]
    pub fn project_reference_paths(&self) -> Vec<&str> {
        self.frameworks
            .iter()
            .flat_map(|section| section.project_references.iter())
            .chain(self.project_references.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Document shape of an assets file, limited to the fields the reader
/// consumes. Sections whose contents vary per entry stay as raw maps.
#[derive(Debug, Deserialize)]
struct ManifestDocument {
    targets: Option<Map<String, Value>>,
    project: Option<ProjectSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectSection {
    frameworks: Option<Map<String, Value>>,
    project_references: Option<Map<String, Value>>,
    restore: Option<RestoreSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestoreSection {
    project_name: Option<String>,
}

fn parse_entries(entries: &Value) -> Vec<ResolvedEntry> {
    entries
        .as_object()
        .map(|object| {
            object
                .iter()
                .map(|(key, value)| ResolvedEntry {
                    key: key.clone(),
                    dependencies: object_keys(value.get("dependencies")),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn object_keys(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_object)
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}

/// Byte offset of a JSON parse error from its 1-based line/column
fn error_span(content: &str, error: &serde_json::Error) -> Option<SourceSpan> {
    let line = error.line();
    if line == 0 {
        return None;
    }

    let mut offset = 0usize;
    for (index, text) in content.split('\n').enumerate() {
        if index + 1 == line {
            let column = error.column().saturating_sub(1).min(text.len());
            return Some(SourceSpan::new((offset + column).into(), 1));
        }
        offset += text.len() + 1;
    }

    None
}
