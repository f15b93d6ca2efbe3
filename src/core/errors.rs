//! Error types for the cribcheck-rs library.
//!
//! Discovery failures are surfaced to the caller as typed errors carrying a
//! human-readable message. Report assembly recovers from its failures locally
//! and only records them as diagnostics, so most of the variants below are
//! produced by the discovery engine and by configuration loading.

use std::io;

use thiserror::Error;

/// Main result type for cribcheck operations.
pub type Result<T> = std::result::Result<T, CribError>;

/// Error type for all cribcheck operations.
#[derive(Error, Debug)]
pub enum CribError {
    /// The submission root is missing, is not a directory, or cannot be listed.
    #[error("Root directory error: {message}")]
    RootDirectory {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error, when the failure came from the filesystem
        #[source]
        source: Option<io::Error>,
    },

    /// The configured basecode cannot be resolved or is invalid.
    #[error("Basecode error: {message}")]
    Basecode {
        /// Human-readable error message
        message: String,
        /// Submission error that was re-signaled as a basecode error
        #[source]
        source: Option<Box<CribError>>,
    },

    /// A submission candidate is structurally invalid.
    #[error("Submission error: {message}")]
    Submission {
        /// Human-readable error message
        message: String,
        /// Display name of the offending submission
        submission: Option<String>,
    },

    /// I/O related errors
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },
}

impl CribError {
    /// Create a root directory error without an underlying cause
    pub fn root_directory(message: impl Into<String>) -> Self {
        Self::RootDirectory {
            message: message.into(),
            source: None,
        }
    }

    /// Create a root directory error caused by an I/O failure
    pub fn root_directory_io(message: impl Into<String>, source: io::Error) -> Self {
        Self::RootDirectory {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a basecode error
    pub fn basecode(message: impl Into<String>) -> Self {
        Self::Basecode {
            message: message.into(),
            source: None,
        }
    }

    /// Re-signal a submission error as a basecode error, keeping its message.
    pub fn basecode_from(cause: CribError) -> Self {
        let message = match &cause {
            Self::Submission { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self::Basecode {
            message,
            source: Some(Box::new(cause)),
        }
    }

    /// Create a submission error
    pub fn submission(message: impl Into<String>, submission: impl Into<String>) -> Self {
        Self::Submission {
            message: message.into(),
            submission: Some(submission.into()),
        }
    }

    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error with field context
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Prefix the message of an error with additional context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        match &mut self {
            Self::RootDirectory { message, .. }
            | Self::Basecode { message, .. }
            | Self::Submission { message, .. }
            | Self::Io { message, .. }
            | Self::Config { message, .. }
            | Self::Serialization { message, .. }
            | Self::Validation { message, .. } => {
                *message = format!("{context}: {message}");
            }
        }
        self
    }

    /// Whether this error was raised while resolving the basecode.
    pub fn is_basecode(&self) -> bool {
        matches!(self, Self::Basecode { .. })
    }
}

impl From<io::Error> for CribError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for CribError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for CribError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// Result extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add lazily built context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<CribError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }
}
