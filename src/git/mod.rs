//! Git operations for the repository initializer.
//!
//! Like Cargo, this tool drives the system `git` binary rather than linking
//! a git library: the user's existing configuration, credential helpers, and
//! hooks behave exactly as they would on the command line. Commands are
//! assembled with a small builder and executed through
//! [`tokio::process::Command`] with captured output, so a failure can be
//! reported with git's own stderr attached.
//!
//! The initializer is a strictly ordered, one-shot sequence - `init`,
//! `add .`, `commit --no-verify` - and any failure is fatal. `--no-verify`
//! is passed so a template's commit hooks cannot reject the initial commit.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::constants::INITIAL_COMMIT_MESSAGE;
use crate::core::ScaffoldError;

/// Builder for a single git invocation.
///
/// Holds the argument list and working directory; [`execute`](Self::execute)
/// runs the command and maps a non-zero exit onto
/// [`ScaffoldError::GitCommandError`] carrying the captured stderr.
#[derive(Debug, Default)]
pub struct GitCommand {
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl GitCommand {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working directory the command runs in.
    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Append arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// `git init`
    #[must_use]
    pub fn init() -> Self {
        Self::new().args(["init"])
    }

    /// `git add .`
    #[must_use]
    pub fn add_all() -> Self {
        Self::new().args(["add", "."])
    }

    /// `git commit --no-verify --message <message>`
    #[must_use]
    pub fn commit(message: &str) -> Self {
        Self::new().args(["commit", "--no-verify", "--message", message])
    }

    /// The git subcommand, for error reporting.
    fn operation(&self) -> String {
        self.args.first().cloned().unwrap_or_else(|| "git".to_string())
    }

    /// Run the command, capturing output.
    ///
    /// No timeout is applied; a hung git command blocks the workflow, which
    /// matches the rest of the tool's child-process handling.
    pub async fn execute(self) -> Result<()> {
        tracing::debug!(target: "git", "executing: git {}", self.args.join(" "));

        let mut cmd = Command::new("git");
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .await
            .with_context(|| format!("failed to execute git {}", self.args.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(target: "git", "command failed: {}", stderr);
            return Err(ScaffoldError::GitCommandError { operation: self.operation(), stderr }.into());
        }

        Ok(())
    }
}

/// Check that the `git` binary is reachable on PATH.
pub fn ensure_git_available() -> Result<()> {
    which::which("git").map_err(|_| ScaffoldError::GitNotFound)?;
    Ok(())
}

/// Initialize a repository in the freshly scaffolded project.
///
/// Runs `init`, `add .`, and the initial commit in order; the first failure
/// aborts with git's stderr. Never silently skipped - callers opt out with
/// `--skip-git` before reaching this point.
pub async fn init_repository(target: &Path) -> Result<()> {
    ensure_git_available()?;

    GitCommand::init().current_dir(target).execute().await?;
    GitCommand::add_all().current_dir(target).execute().await?;
    GitCommand::commit(INITIAL_COMMIT_MESSAGE).current_dir(target).execute().await?;

    Ok(())
}
