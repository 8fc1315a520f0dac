//! Command-line interface for create-connectkit.
//!
//! Unlike a multi-command package manager this tool is a single linear
//! workflow, so the [`Cli`] struct *is* the command: parse, resolve the
//! request, then run the stages strictly top to bottom:
//!
//! Resolve -> Materialize -> Patch -> Install -> (optional) Commit
//!
//! Each stage is a fallible call and the first failure aborts the run with a
//! plain early return; there is no retry and no rollback of partial state.
//! The only loop in the whole workflow is the interactive name prompt, which
//! re-prompts on validation failure. A dismissed prompt cancels the run
//! cleanly (exit 0, nothing created).

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::env;
use std::ffi::OsString;

use crate::constants::TEMPLATES_DIR_ENV;
use crate::installer::PackageManager;
use crate::project::{self, ProjectRequest};
use crate::template::Template;
use crate::{git, installer, manifest, prompt, template};

/// Main CLI structure for create-connectkit.
///
/// Flag surface mirrors what users of `create-*` tools expect: an optional
/// positional project directory, one flag per supported package manager, an
/// opt-out for git, and a template selector. Unknown flags are deliberately
/// tolerated so wrapper scripts can pass extra options through without
/// breaking older or newer versions of this tool; see
/// [`parse_lenient`](Self::parse_lenient).
#[derive(Debug, Parser)]
#[command(
    name = "create-connectkit",
    about = "Scaffold a new Particle Connectkit app from a starter template",
    version
)]
pub struct Cli {
    /// Directory name for the new project (also becomes the package name)
    pub project_directory: Option<String>,

    /// Explicitly bootstrap the app using npm
    #[arg(long)]
    pub use_npm: bool,

    /// Explicitly bootstrap the app using Yarn
    #[arg(long)]
    pub use_yarn: bool,

    /// Explicitly bootstrap the app using pnpm
    #[arg(long)]
    pub use_pnpm: bool,

    /// Skip initializing a git repository
    #[arg(long)]
    pub skip_git: bool,

    /// Choose app template
    #[arg(long, value_name = "templateName")]
    pub template: Option<String>,

    /// Unrecognized options, set aside by [`parse_lenient`](Self::parse_lenient)
    /// and never inspected
    #[arg(skip)]
    pub passthrough: Vec<OsString>,
}

impl Cli {
    /// Parse arguments, tolerating unknown options anywhere on the line.
    ///
    /// clap has no direct equivalent of commander's `allowUnknownOption`, so
    /// the argument list is partitioned first: tokens belonging to the known
    /// flag surface (and the first bare token, the project directory) go to
    /// the real parser, while every unrecognized option lands in
    /// `passthrough`. Known flags therefore take effect no matter where an
    /// unknown one appears; `--help` and `--version` keep their normal clap
    /// behavior.
    #[must_use]
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut iter = args.into_iter().map(Into::into);
        let mut known: Vec<OsString> =
            vec![iter.next().unwrap_or_else(|| OsString::from("create-connectkit"))];
        let mut passthrough: Vec<OsString> = Vec::new();
        let mut saw_positional = false;

        while let Some(arg) = iter.next() {
            let text = arg.to_string_lossy().into_owned();
            match text.as_str() {
                "--use-npm" | "--use-yarn" | "--use-pnpm" | "--skip-git" | "--help" | "-h"
                | "--version" | "-V" => known.push(arg),
                "--template" => {
                    known.push(arg);
                    if let Some(value) = iter.next() {
                        known.push(value);
                    }
                }
                _ if text.starts_with("--template=") => known.push(arg),
                // Any other option-looking token is an unknown flag.
                _ if text.starts_with('-') && text.len() > 1 => passthrough.push(arg),
                _ if !saw_positional => {
                    saw_positional = true;
                    known.push(arg);
                }
                _ => passthrough.push(arg),
            }
        }

        let mut cli = Self::parse_from(known);
        cli.passthrough = passthrough;
        cli
    }

    /// Run the full scaffolding workflow.
    ///
    /// Returns `Ok(())` both on success and on a cancelled prompt; every
    /// failure path surfaces as an error for `main` to classify.
    pub async fn execute(self) -> Result<()> {
        println!();
        println!("{}", "🤩 Welcome to Particle Network!".green());

        let Some(request) = self.resolve_request()? else {
            // Prompt dismissed: exit cleanly with nothing created.
            println!();
            return Ok(());
        };

        println!();
        println!(
            "{}",
            format!("🚀 Creating a new Connectkit app in {}", request.target_path.display())
                .cyan()
        );

        let template_dir = template::directory_for(request.template)?;
        template::materialize(&template_dir, &request.target_path)?;

        manifest::patch(&request.target_path, &request.name)?;

        println!(
            "{}",
            format!(
                "📦 Installing dependencies with {}. This could take a while.",
                request.package_manager
            )
            .cyan()
        );
        installer::ensure_available(request.package_manager)?;
        installer::install_dependencies(request.package_manager, &request.target_path).await?;
        installer::add_pinned_dependencies(request.package_manager, &request.target_path).await?;

        if self.skip_git {
            tracing::debug!("skipping git initialization (--skip-git)");
        } else {
            println!("{}", "📚 Initializing git repository".cyan());
            git::init_repository(&request.target_path).await?;
        }

        self.print_success(&request);
        Ok(())
    }

    /// Input-resolution stage: produce a validated [`ProjectRequest`] or
    /// `None` when the user cancels a prompt.
    fn resolve_request(&self) -> Result<Option<ProjectRequest>> {
        self.resolve_request_with(prompt::project_name, prompt::template_choice)
    }

    /// [`resolve_request`](Self::resolve_request) with the interactive
    /// prompts passed in, so tests can drive the cancellation paths without
    /// a terminal.
    fn resolve_request_with(
        &self,
        name_prompt: impl FnOnce() -> Result<Option<String>>,
        template_prompt: impl FnOnce() -> Result<Option<Template>>,
    ) -> Result<Option<ProjectRequest>> {
        let name = match &self.project_directory {
            Some(raw) => {
                let trimmed = raw.trim();
                project::validate_argument_name(trimmed)?;
                trimmed.to_string()
            }
            None => {
                println!();
                match name_prompt()? {
                    Some(name) => name,
                    None => return Ok(None),
                }
            }
        };

        let target_path = env::current_dir()?.join(&name);
        if target_path.exists() {
            return Err(crate::core::ScaffoldError::TargetExists { path: name }.into());
        }

        let template = match &self.template {
            Some(id) if !id.is_empty() => Template::from_id(id).ok_or_else(|| {
                crate::core::ScaffoldError::TemplateNotFound {
                    name: id.clone(),
                    path: template::templates_root()
                        .map_or_else(|_| id.clone(), |root| root.join(id).display().to_string()),
                }
            })?,
            _ => match template_prompt()? {
                Some(template) => template,
                None => return Ok(None),
            },
        };

        let package_manager =
            PackageManager::resolve(self.use_npm, self.use_yarn, self.use_pnpm);

        tracing::debug!(
            "resolved request: name={name} template={} manager={package_manager} templates_env={}",
            template.id(),
            env::var(TEMPLATES_DIR_ENV).unwrap_or_default()
        );

        Ok(Some(ProjectRequest { name, template, target_path, package_manager }))
    }

    /// Closing output: thanks, the .env reminder, and the get-started hint
    /// (which varies by package manager and template).
    fn print_success(&self, request: &ProjectRequest) {
        println!(
            "{}",
            "🤩 Done! Thanks for using Particle Network 🙏\n\
             Get more information: https://developers.particle.network/api-reference/connect/desktop/web"
                .green()
        );
        println!();
        println!(
            "{}",
            "❗Before starting, configure the .env file by referring to the README.md.❗".yellow()
        );
        println!();
        println!(
            "{}",
            format!(
                "👉 To get started, run `cd {}` and then `{} {}`",
                request.name,
                request.package_manager.run_prefix(),
                request.template.dev_script()
            )
            .cyan()
        );
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_full_flag_surface() {
        let cli = Cli::parse_from([
            "create-connectkit",
            "my-app",
            "--use-npm",
            "--skip-git",
            "--template",
            "react-connectkit-app",
        ]);
        assert_eq!(cli.project_directory.as_deref(), Some("my-app"));
        assert!(cli.use_npm && cli.skip_git);
        assert_eq!(cli.template.as_deref(), Some("react-connectkit-app"));
    }

    #[test]
    fn unknown_trailing_flags_are_tolerated() {
        let cli = Cli::parse_lenient([
            "create-connectkit",
            "my-app",
            "--use-pnpm",
            "--some-future-flag",
            "value",
        ]);
        assert_eq!(cli.project_directory.as_deref(), Some("my-app"));
        assert!(cli.use_pnpm);
        assert_eq!(cli.passthrough.len(), 2);
    }

    #[test]
    fn known_flags_after_an_unknown_one_still_take_effect() {
        let cli = Cli::parse_lenient([
            "create-connectkit",
            "my-app",
            "--some-future-flag",
            "--use-npm",
        ]);
        assert_eq!(cli.project_directory.as_deref(), Some("my-app"));
        assert!(cli.use_npm);
        assert_eq!(cli.passthrough, [OsString::from("--some-future-flag")]);
    }

    #[test]
    fn leading_unknown_flag_does_not_shadow_the_project_directory() {
        let cli = Cli::parse_lenient(["create-connectkit", "--mystery", "my-app"]);
        assert_eq!(cli.project_directory.as_deref(), Some("my-app"));
        assert_eq!(cli.passthrough, [OsString::from("--mystery")]);
    }

    #[test]
    fn template_value_survives_surrounding_unknown_flags() {
        let cli = Cli::parse_lenient([
            "create-connectkit",
            "-x",
            "--template",
            "react-connectkit-app",
            "--no-telemetry",
            "my-app",
            "--skip-git",
        ]);
        assert_eq!(cli.template.as_deref(), Some("react-connectkit-app"));
        assert_eq!(cli.project_directory.as_deref(), Some("my-app"));
        assert!(cli.skip_git);
        assert_eq!(cli.passthrough.len(), 2);
    }

    #[test]
    fn template_equals_form_is_recognized() {
        let cli =
            Cli::parse_lenient(["create-connectkit", "--template=next-connectkit-app", "my-app"]);
        assert_eq!(cli.template.as_deref(), Some("next-connectkit-app"));
        assert_eq!(cli.project_directory.as_deref(), Some("my-app"));
        assert!(cli.passthrough.is_empty());
    }

    #[test]
    fn all_flags_absent_by_default() {
        let cli = Cli::parse_lenient(["create-connectkit"]);
        assert!(cli.project_directory.is_none());
        assert!(!cli.use_npm && !cli.use_yarn && !cli.use_pnpm && !cli.skip_git);
        assert!(cli.template.is_none());
        assert!(cli.passthrough.is_empty());
    }

    #[test]
    fn cancelled_name_prompt_resolves_to_nothing() {
        let cli = Cli::parse_lenient(["create-connectkit"]);
        let resolved = cli
            .resolve_request_with(|| Ok(None), || panic!("template prompt must not run"))
            .unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn cancelled_template_prompt_resolves_to_nothing() {
        let cli = Cli::parse_lenient(["create-connectkit", "dismissed-app-2f6c"]);
        let resolved = cli
            .resolve_request_with(|| panic!("name prompt must not run"), || Ok(None))
            .unwrap();
        assert!(resolved.is_none());
    }
}
