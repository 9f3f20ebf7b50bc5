//! Resolution of user-supplied paths to the files an analysis needs.
//!
//! An input may be a `.csproj` file, a project directory, or a
//! `project.assets.json` manifest; each resolves to the same trio of
//! project directory, project file, and assets file, any of which may be
//! missing until an external restore runs.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::constants::manifest;

/// Everything locatable on disk for one project input
#[derive(Debug, Clone)]
pub struct ProjectLocation {
    input: PathBuf,
    project_dir: Option<PathBuf>,
    project_file: Option<PathBuf>,
    assets_file: Option<PathBuf>,
}

impl ProjectLocation {
    /// Best-effort resolution; never fails, missing pieces stay `None`
    #[must_use]
    pub fn resolve(input: &Path) -> Self {
        let input = std::path::absolute(input).unwrap_or_else(|_| input.to_path_buf());

        if input.is_file() {
            if is_assets_file(&input) {
                let project_dir = owning_project_dir(&input);
                let project_file = project_dir.as_deref().and_then(find_csproj_in);
                return Self {
                    assets_file: Some(input.clone()),
                    project_dir,
                    project_file,
                    input,
                };
            }

            if is_project_file(&input) {
                let project_dir = input.parent().map(Path::to_path_buf);
                let assets_file = project_dir.as_deref().and_then(find_assets_under_obj);
                return Self {
                    project_file: Some(input.clone()),
                    project_dir,
                    assets_file,
                    input,
                };
            }
        }

        if input.is_dir() {
            let project_file = find_csproj_in(&input);
            let assets_file = find_assets_under_obj(&input);
            return Self {
                project_dir: Some(input.clone()),
                project_file,
                assets_file,
                input,
            };
        }

        // The path does not exist; its parent may still work as a restore
        // target (restore creates obj/ and the manifest)
        let project_dir = input
            .parent()
            .filter(|parent| parent.is_dir())
            .map(Path::to_path_buf);
        Self {
            project_dir,
            project_file: None,
            assets_file: None,
            input,
        }
    }

    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    #[must_use]
    pub fn project_dir(&self) -> Option<&Path> {
        self.project_dir.as_deref()
    }

    #[must_use]
    pub fn project_file(&self) -> Option<&Path> {
        self.project_file.as_deref()
    }

    #[must_use]
    pub fn assets_file(&self) -> Option<&Path> {
        self.assets_file.as_deref()
    }

    /// Project file stem, the preferred display name for a project node
    #[must_use]
    pub fn project_file_stem(&self) -> Option<String> {
        self.project_file
            .as_deref()
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
    }

    #[must_use]
    pub fn directory_name(&self) -> Option<String> {
        self.project_dir
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }

    #[must_use]
    pub fn input_stem(&self) -> Option<String> {
        self.input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }

    /// Re-run assets discovery, typically after an external restore
    pub fn rescan_assets(&mut self) {
        if self.assets_file.is_some() {
            return;
        }
        if let Some(dir) = self.project_dir.as_deref() {
            self.assets_file = find_assets_under_obj(dir);
        }
    }
}

/// First `*.csproj` directly inside a directory, alphabetically for a
/// deterministic pick when several exist
#[must_use]
pub fn find_csproj_in(dir: &Path) -> Option<PathBuf> {
    let pattern = dir.join(format!("*.{}", manifest::PROJECT_FILE_EXT));
    let paths = glob::glob(&pattern.to_string_lossy()).ok()?;
    paths.flatten().find(|path| path.is_file())
}

/// Locate the assets manifest under a project's `obj` directory.
///
/// The standard location is `obj/project.assets.json`; custom intermediate
/// output paths nest it deeper, so a recursive search backs the candidate.
#[must_use]
pub fn find_assets_under_obj(project_dir: &Path) -> Option<PathBuf> {
    let obj_dir = project_dir.join(manifest::OBJ_DIR);
    let candidate = obj_dir.join(manifest::ASSETS_FILE_NAME);
    if candidate.is_file() {
        return Some(candidate);
    }

    if !obj_dir.is_dir() {
        return None;
    }

    WalkDir::new(&obj_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_type().is_file()
                && entry.file_name().eq_ignore_ascii_case(manifest::ASSETS_FILE_NAME)
        })
        .map(walkdir::DirEntry::into_path)
}

/// Canonical lower-cased form of a path, used as the visited-set key so the
/// same manifest reached through different spellings is processed once
#[must_use]
pub fn canonical_key(path: &Path) -> String {
    let canonical = std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf());
    canonical.to_string_lossy().to_lowercase()
}

/// Resolve a declared project-reference path against the directory of the
/// project that declares it, normalizing Windows separators first
#[must_use]
pub fn resolve_reference(base_dir: &Path, reference: &str) -> PathBuf {
    let normalized = reference.replace('\\', "/");
    let path = Path::new(&normalized);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn is_assets_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.eq_ignore_ascii_case(manifest::ASSETS_FILE_NAME))
}

fn is_project_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(manifest::PROJECT_FILE_EXT))
}

/// Walk up from the assets file past the `obj` ancestor to the project dir
fn owning_project_dir(assets: &Path) -> Option<PathBuf> {
    let mut dir = assets.parent();
    while let Some(current) = dir {
        if current
            .file_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(manifest::OBJ_DIR))
        {
            return current.parent().map(Path::to_path_buf);
        }
        dir = current.parent();
    }
    None
}
