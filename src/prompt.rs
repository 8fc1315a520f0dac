//! Interactive prompts for the input-resolution stage.
//!
//! Both prompts return `Ok(None)` when the user dismisses them (Ctrl-C or
//! Esc), which the workflow treats as a clean cancellation: exit code 0,
//! nothing created. Validation failures inside the name prompt never abort -
//! dialoguer re-prompts with the failure reason until the input passes.

use anyhow::Result;
use dialoguer::{Input, Select};

use crate::constants::DEFAULT_PROJECT_NAME;
use crate::project;
use crate::template::Template;

/// Whether a dialoguer error represents the prompt being dismissed rather
/// than a real terminal failure.
fn is_cancellation(err: &dialoguer::Error) -> bool {
    match err {
        dialoguer::Error::IO(io_err) => io_err.kind() == std::io::ErrorKind::Interrupted,
        // dialoguer::Error is non_exhaustive
        _ => false,
    }
}

/// Collapse a prompt result into the cancellation protocol: a dismissed
/// prompt becomes `Ok(None)`, any other failure stays an error.
fn map_cancellation<T>(result: Result<T, dialoguer::Error>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if is_cancellation(&err) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Ask for the project name, suggesting a default.
///
/// The inline validator applies the same rules as the argument path (npm
/// naming rules plus the reserved set), so only a valid name can come back.
pub fn project_name() -> Result<Option<String>> {
    let result = Input::<String>::new()
        .with_prompt("What is the name of your project?")
        .default(DEFAULT_PROJECT_NAME.to_string())
        .validate_with(|input: &String| project::validate_new_name(input.trim()))
        .interact_text();

    Ok(map_cancellation(result)?.map(|value| value.trim().to_string()))
}

/// Ask which template to scaffold, as a single-choice menu over the fixed
/// set.
pub fn template_choice() -> Result<Option<Template>> {
    let labels: Vec<&str> = Template::ALL.iter().map(|t| t.display_name()).collect();

    let result = Select::new()
        .with_prompt("What is the template of your project?")
        .items(&labels)
        .default(0)
        .interact_opt();

    Ok(map_cancellation(result)?.flatten().map(|index| Template::ALL[index]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn io_error(kind: io::ErrorKind) -> dialoguer::Error {
        io::Error::new(kind, "terminal").into()
    }

    #[test]
    fn ctrl_c_interrupt_is_a_cancellation() {
        assert!(is_cancellation(&io_error(io::ErrorKind::Interrupted)));
    }

    #[test]
    fn other_io_errors_are_not_cancellations() {
        assert!(!is_cancellation(&io_error(io::ErrorKind::BrokenPipe)));
        assert!(!is_cancellation(&io_error(io::ErrorKind::UnexpectedEof)));
    }

    #[test]
    fn dismissal_maps_to_none() {
        let mapped = map_cancellation::<String>(Err(io_error(io::ErrorKind::Interrupted)));
        assert!(mapped.unwrap().is_none());
    }

    #[test]
    fn real_terminal_failures_stay_errors() {
        let mapped = map_cancellation::<String>(Err(io_error(io::ErrorKind::BrokenPipe)));
        assert!(mapped.is_err());
    }

    #[test]
    fn successful_input_passes_through() {
        let mapped = map_cancellation(Ok("my-app".to_string()));
        assert_eq!(mapped.unwrap().as_deref(), Some("my-app"));
    }
}
