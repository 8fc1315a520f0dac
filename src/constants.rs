//! Global constants used throughout the create-connectkit codebase.
//!
//! The reserved-name and copy-exclusion lists are deliberately plain string
//! arrays. They are small, fixed, and referenced from more than one module,
//! so defining them centrally keeps the magic strings discoverable.

/// Package names a new project may not take.
///
/// These collide with either this tool's own client library or one of the
/// core framework packages the generated templates depend on. Accepting any
/// of them would produce a project that shadows its own dependencies.
pub const RESERVED_PACKAGE_NAMES: [&str; 4] =
    ["@particle-network/connectkit", "next", "react", "react-dom"];

/// Path fragments that are never copied out of a template.
///
/// A template path is skipped when its location relative to the template root
/// contains any of these substrings. Covers build artifacts, the changelog,
/// the lockfile, and the dependency cache directory.
pub const COPY_EXCLUDE_PATTERNS: [&str; 4] = ["node_modules", ".next", "CHANGELOG.md", "yarn.lock"];

/// Filename prefix that stands in for a leading dot in template sources.
///
/// Some environments cannot author literal dotfiles, so templates ship
/// `_dot_env` instead of `.env`; the prefix is converted back on copy.
pub const DOTFILE_SENTINEL: &str = "_dot_";

/// The connectkit client library, re-added at its latest tag after install.
pub const CONNECTKIT_PACKAGE: &str = "@particle-network/connectkit";

/// The blockchain client library, pinned to major version 2.
pub const VIEM_PINNED_PACKAGE: &str = "viem@2";

/// Version written into every freshly scaffolded manifest.
pub const INITIAL_VERSION: &str = "0.1.0";

/// Default suggestion offered by the interactive project-name prompt.
pub const DEFAULT_PROJECT_NAME: &str = "particle-connectkit-app";

/// Commit message used by the repository initializer.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit from create-connectkit";

/// Environment variable overriding where templates are looked up.
///
/// Primarily used by the integration tests, which point it at a temporary
/// templates root instead of the directory shipped next to the executable.
pub const TEMPLATES_DIR_ENV: &str = "CREATE_CONNECTKIT_TEMPLATES";
