//! Starter templates and the copy step that materializes them.
//!
//! Templates are a closed set: each variant of [`Template`] maps to a
//! directory shipped under `templates/` next to the executable. Keeping the
//! set as an enum (rather than open-ended string dispatch) means an invalid
//! id can only enter the system at the CLI boundary, where it is rejected
//! with a user-facing error.
//!
//! # Copy semantics
//!
//! [`materialize`] walks the template tree and copies every file into the
//! target directory, preserving structure, with two rules applied against
//! the path *relative to the template root*:
//!
//! - paths containing any of the fixed exclusion substrings (build
//!   artifacts, changelog, lockfile, dependency cache) are skipped
//! - any path segment starting with the `_dot_` sentinel has the prefix
//!   replaced by a literal dot, so `_dot_env.local` lands as `.env.local`
//!
//! The copy assumes the destination does not exist yet (the input stage
//! enforces this) and performs no cleanup on failure: a permissions or disk
//! error aborts the workflow and leaves whatever was already written.

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::{COPY_EXCLUDE_PATTERNS, DOTFILE_SENTINEL, TEMPLATES_DIR_ENV};
use crate::core::ScaffoldError;

/// The fixed set of starter templates this tool can scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Next.js starter wired up with connectkit
    NextConnectkitApp,
    /// create-react-app style starter wired up with connectkit
    ReactConnectkitApp,
}

impl Template {
    /// All templates, in the order they are offered interactively.
    pub const ALL: [Self; 2] = [Self::NextConnectkitApp, Self::ReactConnectkitApp];

    /// Directory name under the templates root.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::NextConnectkitApp => "next-connectkit-app",
            Self::ReactConnectkitApp => "react-connectkit-app",
        }
    }

    /// Label shown in the interactive selection menu.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::NextConnectkitApp => "create-next-app",
            Self::ReactConnectkitApp => "create-react-app",
        }
    }

    /// The script that starts a dev server in the generated project.
    #[must_use]
    pub const fn dev_script(self) -> &'static str {
        match self {
            Self::NextConnectkitApp => "dev",
            Self::ReactConnectkitApp => "start",
        }
    }

    /// Resolve a template id as given on the command line.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}

/// Locate the root directory holding the shipped templates.
///
/// Resolution order:
/// 1. the `CREATE_CONNECTKIT_TEMPLATES` environment variable, if set
/// 2. a `templates` directory next to the running executable
/// 3. the crate source tree (development fallback for `cargo run`)
pub fn templates_root() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(TEMPLATES_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let exe = env::current_exe().context("failed to locate the running executable")?;
    if let Some(beside) = exe.parent().map(|dir| dir.join("templates")) {
        if beside.is_dir() {
            return Ok(beside);
        }
    }

    Ok(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates"))
}

/// Resolve a template to its on-disk directory, failing if it is missing.
pub fn directory_for(template: Template) -> Result<PathBuf> {
    let dir = templates_root()?.join(template.id());
    if !dir.is_dir() {
        return Err(ScaffoldError::TemplateNotFound {
            name: template.id().to_string(),
            path: dir.display().to_string(),
        }
        .into());
    }
    Ok(dir)
}

/// Whether a relative template path is on the exclusion list.
fn is_excluded(relative: &Path) -> bool {
    // Compare against a normalized string so the substring match behaves the
    // same regardless of the platform path separator.
    let normalized = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    COPY_EXCLUDE_PATTERNS.iter().any(|pattern| normalized.contains(pattern))
}

/// Map a relative template path to its destination path, converting any
/// sentinel-prefixed segment back to a dotfile segment.
fn destination_path(target: &Path, relative: &Path) -> PathBuf {
    let mut dest = target.to_path_buf();
    for component in relative.components() {
        let segment = component.as_os_str().to_string_lossy();
        match segment.strip_prefix(DOTFILE_SENTINEL) {
            Some(rest) => dest.push(format!(".{rest}")),
            None => dest.push(segment.as_ref()),
        }
    }
    dest
}

/// Recursively copy a template directory into the target directory.
///
/// Symlinks and other special files are skipped; only regular files and
/// directories are materialized.
pub fn materialize(template_dir: &Path, target: &Path) -> Result<()> {
    tracing::debug!(
        "materializing template {} into {}",
        template_dir.display(),
        target.display()
    );

    for entry in WalkDir::new(template_dir) {
        let entry = entry
            .with_context(|| format!("failed to walk template {}", template_dir.display()))?;
        let relative = entry
            .path()
            .strip_prefix(template_dir)
            .expect("walkdir yields paths under its root");

        if relative.as_os_str().is_empty() || is_excluded(relative) {
            continue;
        }

        let dest = destination_path(target, relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&dest)
                .with_context(|| format!("failed to create directory {}", dest.display()))?;
        } else if file_type.is_file() {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::copy(entry.path(), &dest).with_context(|| {
                format!("failed to copy {} to {}", entry.path().display(), dest.display())
            })?;
        }
    }

    Ok(())
}
