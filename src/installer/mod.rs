//! Dependency installation via an external package manager.
//!
//! The installer shells out twice, always in the target directory and with
//! inherited stdio so the user watches the real installer output:
//!
//! 1. `<manager> install` - installs everything the patched manifest
//!    declares
//! 2. `<manager> add|install @particle-network/connectkit viem@2` - adds the
//!    two libraries the manifest patcher stripped, at controlled versions
//!    (connectkit at its latest tag, viem pinned to major version 2)
//!
//! Which binary runs is resolved from the CLI flags with pnpm > yarn > npm
//! precedence, falling back to detection of the ambient manager via the
//! `npm_config_user_agent` environment variable, and finally to npm.
//!
//! No timeout is applied: a hung installer blocks the workflow, which is the
//! accepted behavior for an interactive tool whose output is visible.

use anyhow::Result;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::constants::{CONNECTKIT_PACKAGE, VIEM_PINNED_PACKAGE};
use crate::core::ScaffoldError;

/// The package managers this tool knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Resolve the manager from CLI flags, with pnpm > yarn > npm precedence
    /// when several are given, falling back to ambient detection.
    #[must_use]
    pub fn resolve(use_npm: bool, use_yarn: bool, use_pnpm: bool) -> Self {
        if use_pnpm {
            Self::Pnpm
        } else if use_yarn {
            Self::Yarn
        } else if use_npm {
            Self::Npm
        } else {
            Self::detect()
        }
    }

    /// Detect the manager the user launched this tool with.
    ///
    /// Package managers set `npm_config_user_agent` for the processes they
    /// spawn (e.g. `pnpm/9.1.0 npm/? node/v20.11.0 linux x64`), so running
    /// `pnpm create connectkit` is detected without any flag.
    #[must_use]
    pub fn detect() -> Self {
        std::env::var("npm_config_user_agent")
            .ok()
            .map_or(Self::Npm, |agent| Self::from_user_agent(&agent))
    }

    fn from_user_agent(agent: &str) -> Self {
        if agent.starts_with("pnpm") {
            Self::Pnpm
        } else if agent.starts_with("yarn") {
            Self::Yarn
        } else {
            Self::Npm
        }
    }

    /// The binary to invoke.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// The verb that adds packages to an existing project.
    ///
    /// yarn calls it `add`; npm and pnpm accept `install` with package
    /// arguments.
    #[must_use]
    pub const fn add_verb(self) -> &'static str {
        match self {
            Self::Yarn => "add",
            Self::Npm | Self::Pnpm => "install",
        }
    }

    /// How a script from the manifest is run (`npm run dev` vs `yarn dev`).
    #[must_use]
    pub fn run_prefix(self) -> String {
        match self {
            Self::Npm => "npm run".to_string(),
            other => other.command().to_string(),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Verify the resolved manager's binary exists before starting work.
pub fn ensure_available(manager: PackageManager) -> Result<()> {
    which::which(manager.command())
        .map_err(|_| ScaffoldError::CommandNotFound { program: manager.command().to_string() })?;
    Ok(())
}

/// Run the manager with the given arguments in `target`, streaming its
/// output straight to the terminal.
async fn run(manager: PackageManager, args: &[&str], target: &Path) -> Result<()> {
    tracing::debug!("running {} {} in {}", manager, args.join(" "), target.display());

    let status = Command::new(manager.command())
        .args(args)
        .current_dir(target)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::Error::new(ScaffoldError::CommandNotFound {
                    program: manager.command().to_string(),
                })
            } else {
                anyhow::Error::new(e)
            }
        })?;

    if !status.success() {
        return Err(ScaffoldError::ProcessFailed {
            command: format!("{} {}", manager.command(), args.join(" ")),
            code: status.code(),
        }
        .into());
    }

    Ok(())
}

/// Stage 1: install everything the patched manifest declares.
pub async fn install_dependencies(manager: PackageManager, target: &Path) -> Result<()> {
    run(manager, &["install"], target).await
}

/// Stage 2: add the stripped libraries back at controlled versions.
pub async fn add_pinned_dependencies(manager: PackageManager, target: &Path) -> Result<()> {
    run(manager, &[manager.add_verb(), CONNECTKIT_PACKAGE, VIEM_PINNED_PACKAGE], target).await
}
