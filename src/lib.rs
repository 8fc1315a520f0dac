//! create-connectkit - scaffold a new Particle Connectkit app.
//!
//! A project-scaffolding CLI: it resolves a project name and template (from
//! flags or interactive prompts), copies the chosen starter template into a
//! new directory, patches the copied package manifest, installs dependencies
//! with the user's package manager, and optionally initializes a git
//! repository.
//!
//! # Workflow
//!
//! A single invocation runs one strictly sequential pipeline:
//!
//! 1. [`cli`] / [`prompt`] / [`project`] - resolve and validate the request
//! 2. [`template`] - materialize the template tree (exclusions applied,
//!    `_dot_` sentinel files restored to dotfiles)
//! 3. [`manifest`] - patch `package.json` (name, initial version, strip the
//!    two dependencies that get re-added pinned)
//! 4. [`installer`] - `install`, then add connectkit and `viem@2` back
//! 5. [`git`] - `init` / `add .` / initial commit, unless `--skip-git`
//!
//! Every stage is one-shot: the first failure terminates the process with a
//! non-zero exit code, and partial state is intentionally left on disk (no
//! rollback). The one recoverable path is interactive name validation, which
//! re-prompts instead of failing.
//!
//! # Error model
//!
//! Classified failures live in [`core::error`] and exit with a friendly
//! colored message; anything unclassified is treated as a tool bug and
//! propagates with its full context chain. External processes run with
//! inherited stdio, so their own diagnostics reach the user directly and
//! their exit codes become this process's exit code.

pub mod cli;
pub mod constants;
pub mod core;
pub mod git;
pub mod installer;
pub mod manifest;
pub mod project;
pub mod prompt;
pub mod template;
