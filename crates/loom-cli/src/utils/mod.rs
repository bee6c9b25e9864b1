//! Shared helpers for CLI commands.

pub mod fs;
pub mod logging;

pub use logging::initialize_logging;
