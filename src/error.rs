//! Error types and handling for the charter lead funnel

use thiserror::Error;

/// Main error type for the `CharterLead` library
#[derive(Error, Debug)]
pub enum CharterError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Airport directory communication or shape errors
    #[error("Airport lookup error: {message}")]
    Lookup { message: String },

    /// Lead hand-off errors (webhook or email)
    #[error("Submission error: {message}")]
    Submission { message: String },

    /// Quote provider errors
    #[error("Quote error: {message}")]
    Quote { message: String },

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

impl CharterError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new airport lookup error
    pub fn lookup<S: Into<String>>(message: S) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }

    /// Create a new submission error
    pub fn submission<S: Into<String>>(message: S) -> Self {
        Self::Submission {
            message: message.into(),
        }
    }

    /// Create a new quote error
    pub fn quote<S: Into<String>>(message: S) -> Self {
        Self::Quote {
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
            CharterError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            CharterError::Lookup { .. } => {
                "Airport search is unavailable right now. You can keep typing the location."
                    .to_string()
            }
            CharterError::Submission { .. } => {
                "Your request was received. A charter specialist will follow up shortly."
                    .to_string()
            }
            CharterError::Quote { .. } => {
                "Pricing is unavailable right now. A charter specialist will send quotes directly."
                    .to_string()
            }
            CharterError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            CharterError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            CharterError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = CharterError::config("bad port");
        assert!(matches!(config_err, CharterError::Config { .. }));

        let lookup_err = CharterError::lookup("connection refused");
        assert!(matches!(lookup_err, CharterError::Lookup { .. }));

        let submission_err = CharterError::submission("webhook returned 500");
        assert!(matches!(submission_err, CharterError::Submission { .. }));
    }

    #[test]
    fn test_user_messages() {
        let lookup_err = CharterError::lookup("timeout");
        assert!(lookup_err.user_message().contains("keep typing"));

        let submission_err = CharterError::submission("test");
        assert!(!submission_err.user_message().contains("test"));

        let validation_err = CharterError::validation("passenger count");
        assert!(validation_err.user_message().contains("passenger count"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CharterError = io_err.into();
        assert!(matches!(err, CharterError::Io { .. }));
    }
}
