//! Structured error types for uiglue-core.
//!
//! Widget entry points never return these to the host: configuration
//! problems are built as `WidgetError` values and reported through
//! `tracing`, so a misconfigured widget degrades to inert instead of
//! taking the page down. Config loading is the one place they surface as
//! `Result`s.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for uiglue-core operations
#[derive(Error, Debug)]
pub enum WidgetError {
    /// A required child element was not found under the bound root
    #[error("{widget}: missing required element '.{class}'")]
    MissingElement { widget: String, class: String },

    /// A required capability (search, save, action) was not configured
    #[error("{widget}: options.{capability} must be provided")]
    MissingCapability { widget: String, capability: String },

    /// Widget was bound outside of a tokio runtime
    #[error("{widget}: no tokio runtime available, widget stays inert")]
    NoRuntime { widget: String },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// I/O operation failed
    #[error("I/O error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// Config file is not valid TOML
    #[error("Failed to parse config file {path:?}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Catalog file is not a JSON array of result items
    #[error("Failed to parse catalog {path:?}: {source}")]
    Catalog {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias for uiglue-core operations
pub type Result<T> = std::result::Result<T, WidgetError>;

impl WidgetError {
    /// Create a missing element error
    pub fn missing_element(widget: impl Into<String>, class: impl Into<String>) -> Self {
        Self::MissingElement {
            widget: widget.into(),
            class: class.into(),
        }
    }

    /// Create a missing capability error
    pub fn missing_capability(widget: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::MissingCapability {
            widget: widget.into(),
            capability: capability.into(),
        }
    }

    /// Create a no-runtime error
    pub fn no_runtime(widget: impl Into<String>) -> Self {
        Self::NoRuntime {
            widget: widget.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create an I/O error tied to a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WidgetError::missing_element("DebouncedInput", "status");
        assert_eq!(
            err.to_string(),
            "DebouncedInput: missing required element '.status'"
        );

        let err = WidgetError::missing_capability("LoadingButton", "action");
        assert_eq!(
            err.to_string(),
            "LoadingButton: options.action must be provided"
        );
    }

    #[test]
    fn test_io_error_carries_path() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = WidgetError::io("/tmp/uiglue.toml", io_err);

        assert!(matches!(err, WidgetError::Io { .. }));
        assert!(err.to_string().contains("/tmp/uiglue.toml"));
    }
}
