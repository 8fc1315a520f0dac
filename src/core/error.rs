//! Error handling for create-connectkit.
//!
//! The error system is built around two types:
//! - [`ScaffoldError`] - enumerated failure cases for every stage of the
//!   scaffolding workflow
//! - [`ErrorContext`] - wrapper that adds user-friendly details and
//!   suggestions for terminal display
//!
//! # Error tiers
//!
//! Failures fall into three tiers, each handled differently at the top level:
//!
//! 1. **User input errors** (invalid or reserved project name, pre-existing
//!    target directory, missing template, broken manifest): displayed as a
//!    friendly colored message with a suggestion, process exits with code 1,
//!    no stack trace.
//! 2. **External process failures** (package manager, git): the child's own
//!    output has already reached the terminal, so the message is kept short
//!    and the child's exit code becomes the process exit code.
//! 3. **Everything else** is considered a tool bug and is re-thrown as a
//!    plain [`anyhow::Error`], producing the full context chain so operators
//!    can tell usage mistakes from actual defects.
//!
//! [`user_friendly_error`] performs the classification: it returns an
//! [`ErrorContext`] for tiers 1 and 2 and hands tier 3 back to the caller.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for scaffolding operations.
///
/// Each variant carries enough context to produce an actionable message. The
/// enum only covers *classified* failures; unexpected conditions stay as
/// `anyhow::Error` and surface with a full trace instead.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The requested project name does not satisfy npm package-name rules.
    #[error("the project name \"{name}\" is not a valid package name")]
    InvalidProjectName {
        /// The rejected name
        name: String,
        /// Which rule it broke
        reason: String,
    },

    /// The requested project name collides with a reserved package name.
    ///
    /// Reserved names are this tool's own client library and the core
    /// framework packages the templates scaffold in; see
    /// [`RESERVED_PACKAGE_NAMES`](crate::constants::RESERVED_PACKAGE_NAMES).
    #[error("\"{name}\" is a reserved package name")]
    ReservedProjectName {
        /// The rejected name
        name: String,
    },

    /// The target directory already exists on disk.
    ///
    /// The workflow never merges into or overwrites an existing directory;
    /// this is checked before any write occurs.
    #[error("the target directory \"{path}\" already exists")]
    TargetExists {
        /// The colliding path, as given by the user
        path: String,
    },

    /// The requested template id does not resolve to a template directory.
    #[error("the template directory \"{path}\" does not exist")]
    TemplateNotFound {
        /// The template id that was requested
        name: String,
        /// The directory that was expected to hold it
        path: String,
    },

    /// The copied template has no manifest at its root.
    #[error("no package.json found at {path}")]
    ManifestNotFound {
        /// Expected manifest location
        path: String,
    },

    /// The copied manifest is not valid JSON.
    #[error("invalid package.json at {path}")]
    ManifestParseError {
        /// Manifest location
        path: String,
        /// Parser diagnostic
        reason: String,
    },

    /// The manifest parsed but is missing a field the patcher must touch.
    #[error("malformed package.json at {path}: {reason}")]
    ManifestInvalid {
        /// Manifest location
        path: String,
        /// What was missing or wrong
        reason: String,
    },

    /// Git executable not found in PATH.
    ///
    /// Only raised when repository initialization was requested; `--skip-git`
    /// avoids the requirement entirely.
    #[error("git is not installed or not found in PATH")]
    GitNotFound,

    /// A git command returned a non-zero exit code.
    #[error("git {operation} failed: {stderr}")]
    GitCommandError {
        /// The git operation that failed (e.g. "init", "commit")
        operation: String,
        /// The error output from the git command
        stderr: String,
    },

    /// The resolved package manager binary could not be found in PATH.
    #[error("\"{program}\" is not installed or not found in PATH")]
    CommandNotFound {
        /// The binary that was looked up
        program: String,
    },

    /// An external process exited unsuccessfully.
    ///
    /// The child ran with inherited stdio, so its own diagnostics already
    /// reached the terminal; the recorded exit code is surfaced as this
    /// process's exit code.
    #[error("`{command}` exited with {}", fmt_exit_status(.code))]
    ProcessFailed {
        /// The full command line that failed
        command: String,
        /// The child's exit code, if it exited normally
        code: Option<i32>,
    },
}

fn fmt_exit_status(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("code {c}"),
        None => "a signal".to_string(),
    }
}

impl ScaffoldError {
    /// The exit code this failure should terminate the process with.
    ///
    /// External process failures propagate the child's exit code; every
    /// classified user-facing error exits with 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ProcessFailed { code, .. } => code.unwrap_or(1),
            _ => 1,
        }
    }
}

/// A [`ScaffoldError`] decorated with user-facing context.
///
/// When displayed, shows up to three lines:
/// 1. the error itself, in red
/// 2. optional details, in yellow
/// 3. an optional actionable suggestion, in green
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying classified error
    pub error: ScaffoldError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no additional information attached.
    #[must_use]
    pub const fn new(error: ScaffoldError) -> Self {
        Self { error, suggestion: None, details: None }
    }

    /// Add an actionable suggestion, displayed in green.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add explanatory details, displayed in yellow.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details, and suggestion to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }

    /// Exit code for the wrapped error; see [`ScaffoldError::exit_code`].
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.error.exit_code()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Classify an error for terminal display.
///
/// Returns `Ok(ErrorContext)` when the error is a [`ScaffoldError`], with a
/// variant-appropriate suggestion attached. Any other error is returned
/// unchanged in `Err` so the caller can propagate it with its full context
/// chain intact - a deliberate distinction between usage mistakes and tool
/// bugs.
pub fn user_friendly_error(err: anyhow::Error) -> Result<ErrorContext, anyhow::Error> {
    let scaffold_err = err.downcast::<ScaffoldError>()?;

    let (details, suggestion) = match &scaffold_err {
        ScaffoldError::InvalidProjectName { reason, .. } => (
            Some(reason.clone()),
            Some("Project name must be a valid npm package name".to_string()),
        ),
        ScaffoldError::ReservedProjectName { name } => {
            (None, Some(format!("Please use a project name other than \"{name}\"")))
        }
        ScaffoldError::TargetExists { .. } => (
            None,
            Some("Please remove this directory or choose a different project name".to_string()),
        ),
        ScaffoldError::TemplateNotFound { .. } => {
            (None, Some("Please choose a different template".to_string()))
        }
        ScaffoldError::GitNotFound => (
            None,
            Some("Install git from https://git-scm.com/ or re-run with --skip-git".to_string()),
        ),
        ScaffoldError::CommandNotFound { program } => (
            None,
            Some(format!(
                "Install {program} or select a different package manager with --use-npm, --use-yarn, or --use-pnpm"
            )),
        ),
        ScaffoldError::ManifestNotFound { .. }
        | ScaffoldError::ManifestParseError { .. }
        | ScaffoldError::ManifestInvalid { .. } => {
            (Some("every template must ship a valid package.json at its root".to_string()), None)
        }
        ScaffoldError::GitCommandError { .. } | ScaffoldError::ProcessFailed { .. } => (None, None),
    };

    Ok(ErrorContext { error: scaffold_err, suggestion, details })
}
