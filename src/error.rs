//! Error handling for the device HAL crate.
//!
//! Query operations never return these to their callers; they collapse every
//! [`SensorError`] into a documented sentinel. The errors stay visible on the
//! lower-level readers (`try_sample`, `MemInfo::read_from`, ...) so the exact
//! cause of a flatlined value can be inspected and tested.

use std::io;
use std::path::Path;

/// A specialized `Result` type for HAL operations.
pub type Result<T> = std::result::Result<T, HalError>;

/// The main error type for HAL operations.
#[derive(Debug, thiserror::Error)]
pub enum HalError {
    /// A sensor or accounting source could not be read
    #[error(transparent)]
    Sensor(#[from] SensorError),

    /// The capability does not exist on this platform
    #[error("{capability} is not supported on {platform}")]
    Unsupported {
        capability: &'static str,
        platform: &'static str,
    },

    /// A privileged command was rejected or could not be issued
    #[error("command `{command}` failed: {detail}")]
    Command { command: String, detail: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl HalError {
    /// Create a new unsupported-capability error
    pub fn unsupported(capability: &'static str, platform: &'static str) -> Self {
        Self::Unsupported {
            capability,
            platform,
        }
    }

    /// Create a new command failure
    pub fn command_error(command: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Command {
            command: command.into(),
            detail: detail.into(),
        }
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the platform permanently lacks the requested capability.
    ///
    /// Callers use this to disable a feature instead of retrying it.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Why a single sensor, sysfs file or accounting source yielded no value.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// The file does not exist (device absent or hot-unplugged)
    #[error("sensor source not found: {path}")]
    NotFound { path: String },

    /// The file exists but this process may not read it
    #[error("permission denied reading {path}")]
    PermissionDenied { path: String },

    /// The content is not the expected integer format
    #[error("failed to parse value from {path}: {detail}")]
    Parse { path: String, detail: String },

    /// The content parsed but cannot be used (e.g. a zero total)
    #[error("invalid value from {path}: {detail}")]
    Invalid { path: String, detail: String },

    /// Any other read failure
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The zone was synthesized and has nothing to read
    #[error("thermal zone `{label}` has no backing source")]
    NoSource { label: String },
}

impl SensorError {
    /// Classify an I/O failure on `path` by its kind.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source: err },
        }
    }

    /// Create a new parse error
    pub fn parse_error(path: &Path, detail: impl Into<String>) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            detail: detail.into(),
        }
    }

    /// Create a new invalid-value error
    pub fn invalid(path: &Path, detail: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.display().to_string(),
            detail: detail.into(),
        }
    }
}
