//! Error types and handling for the `Sunseeker` application

use thiserror::Error;

/// Main error type for the `Sunseeker` application
#[derive(Error, Debug)]
pub enum SunseekerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather or places API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl SunseekerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SunseekerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            SunseekerError::Api { .. } => {
                "Unable to reach the weather or places service. Please check your internet connection."
                    .to_string()
            }
            SunseekerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            SunseekerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            SunseekerError::General { message } => message.clone(),
        }
    }
}
