//! Structural validation of notifications before any send attempt.
//!
//! Validation runs in two short-circuited passes: checks common to every
//! channel first, then channel-specific checks only when the common ones
//! pass. Invalid input is a normal outcome encoded in
//! [`ValidationResult`], never an error.

pub mod result;
pub mod validator;

pub use {result::ValidationResult, validator::NotificationValidator};
