//! Error types shared by the alarm crates

use thiserror::Error;

/// The entered time does not match `HH:MM:SS`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Time must be in HH:MM:SS format.")]
pub struct FormatError {
    /// The rejected input, kept for logging
    pub input: String,
}

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),
}
