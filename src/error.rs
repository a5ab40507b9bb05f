//! Error handling for ordo.
//! Authoring problems and resolution gaps are reported through values, not errors;
//! this enum only covers what can stop a command from finishing.

use std::io;
use thiserror::Error;

/// Custom error types for ordo operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors that occur during configuration or bundle parsing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("JSON error: {0}.")]
    SerdeError(#[from] serde_json::Error),

    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    /// A record or script requested at the render entrypoint does not exist.
    #[error("{kind} '{id}' not found.")]
    NotFound { kind: String, id: String },

    /// The data layer failed to answer a lookup.
    #[error("Lookup error: {0}.")]
    LookupError(String),

    /// Producing the final artifact failed. The reason is logged where the
    /// failure happens and never shown to the user.
    #[error("Failed to generate {format} document.")]
    RenderError { format: String, reason: String },
}

impl Error {
    /// Builds a [`Error::RenderError`] and logs the underlying cause.
    pub fn render<E: std::fmt::Display>(format: &str, reason: E) -> Self {
        let reason = reason.to_string();
        log::error!("Error generating {format}: {reason}");
        Error::RenderError { format: format.to_string(), reason }
    }
}

/// Convenience type alias for Results with ordo's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
