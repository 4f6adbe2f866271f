//! Core layer: invocation settings and exit-code policy.

pub mod exit_code;
pub mod settings;

pub use exit_code::{ExitCode, classify};
pub use settings::Settings;
