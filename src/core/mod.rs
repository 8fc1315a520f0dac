//! Core types shared across the scaffolding workflow.
//!
//! Currently this is the error module: the [`ScaffoldError`] taxonomy and the
//! [`ErrorContext`] wrapper used to present failures to CLI users.

pub mod error;

pub use error::{ErrorContext, ScaffoldError, user_friendly_error};
