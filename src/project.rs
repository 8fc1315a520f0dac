//! Project name validation and the resolved scaffolding request.
//!
//! Names must satisfy npm's rules for *new* packages, which are stricter than
//! what the registry historically accepted: lowercase only, URL-safe
//! characters, no leading `.` or `_`, at most 214 characters. Scoped names
//! (`@scope/name`) are allowed and both halves are validated.
//!
//! On top of the naming rules, a small fixed set of reserved names is
//! rejected so a generated project cannot shadow its own dependencies.

use std::path::PathBuf;

use crate::constants::RESERVED_PACKAGE_NAMES;
use crate::core::ScaffoldError;
use crate::installer::PackageManager;
use crate::template::Template;

/// npm refuses names longer than this for new packages.
const MAX_NAME_LENGTH: usize = 214;

/// Names npm itself blacklists for new packages.
const BLACKLISTED_NAMES: [&str; 2] = ["node_modules", "favicon.ico"];

/// Everything the workflow needs, resolved up front by the input stage.
///
/// Built once per invocation and discarded at process exit. By the time this
/// exists, the name has been validated, the target path is known not to be
/// taken, and the template id maps to a real directory.
#[derive(Debug, Clone)]
pub struct ProjectRequest {
    /// Validated project (and package) name
    pub name: String,
    /// The chosen starter template
    pub template: Template,
    /// Absolute path the project will be created at (`<cwd>/<name>`)
    pub target_path: PathBuf,
    /// Package manager resolved from flags or the ambient environment
    pub package_manager: PackageManager,
}

/// Check a candidate name against npm new-package rules.
///
/// Returns the violated rule on failure, phrased for direct display in a
/// prompt or error message. Does not consult the reserved-name list; see
/// [`validate_new_name`] for the combined check.
pub fn validate_package_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name cannot be empty".to_string());
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(format!("name cannot contain more than {MAX_NAME_LENGTH} characters"));
    }

    if name.starts_with('.') {
        return Err("name cannot start with a period".to_string());
    }

    if name.starts_with('_') {
        return Err("name cannot start with an underscore".to_string());
    }

    if name.trim() != name {
        return Err("name cannot contain leading or trailing spaces".to_string());
    }

    if BLACKLISTED_NAMES.contains(&name) {
        return Err(format!("\"{name}\" is a blacklisted name"));
    }

    // Scoped names validate each half separately.
    if let Some(rest) = name.strip_prefix('@') {
        let Some((scope, pkg)) = rest.split_once('/') else {
            return Err("scoped name must look like @scope/name".to_string());
        };
        validate_segment(scope)?;
        validate_segment(pkg)?;
        return Ok(());
    }

    validate_segment(name)
}

fn validate_segment(segment: &str) -> Result<(), String> {
    if segment.is_empty() {
        return Err("name cannot be empty".to_string());
    }

    if segment.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("name cannot contain capital letters".to_string());
    }

    for c in segment.chars() {
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_')) {
            return Err(format!("name cannot contain the character '{c}'"));
        }
    }

    Ok(())
}

/// Whether the name collides with the tool's own package or a core framework
/// dependency the templates scaffold in.
#[must_use]
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_PACKAGE_NAMES.contains(&name)
}

/// Combined check used by the interactive prompt: naming rules first, then
/// the reserved set. The returned message is shown verbatim when re-prompting.
pub fn validate_new_name(name: &str) -> Result<(), String> {
    validate_package_name(name)?;
    if is_reserved_name(name) {
        return Err(format!("\"{name}\" is a reserved package name"));
    }
    Ok(())
}

/// Strict variant for names supplied as a command-line argument.
///
/// Unlike the prompt path there is nothing to loop back to, so failures map
/// straight onto the user-facing error variants.
pub fn validate_argument_name(name: &str) -> Result<(), ScaffoldError> {
    if let Err(reason) = validate_package_name(name) {
        return Err(ScaffoldError::InvalidProjectName { name: name.to_string(), reason });
    }
    if is_reserved_name(name) {
        return Err(ScaffoldError::ReservedProjectName { name: name.to_string() });
    }
    Ok(())
}
