//! Error types for device targeting and transports.
//!
//! These cover finding and talking to a device. Problems with the resource
//! data itself belong to `declarative::Error`.

use std::io;
use std::path::PathBuf;

/// Result type alias for device operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or talking to a device.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No device-config entry for the requested target.
    #[error("Target device / certificate '{target}' not found in {}", path.display())]
    TargetNotFound {
        /// Requested target name.
        target: String,
        /// Device config that was searched.
        path: PathBuf,
    },

    /// Malformed device config.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// Two sections with the same name.
    #[error("device '{0}' is defined more than once")]
    DuplicateTarget(String),

    /// No transport for this kind of device.
    #[error("device '{name}' has unsupported type '{device_type}'")]
    UnsupportedDeviceType {
        /// Device name.
        name: String,
        /// Configured type.
        device_type: String,
    },

    /// Device url could not be understood.
    #[error("invalid device url '{0}'")]
    InvalidUrl(String),

    /// IO error while reading or writing device state.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// Path involved in the error.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Device state document is not valid JSON.
    #[error("invalid device state in {}: {source}", path.display())]
    Json {
        /// Path of the document.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON error with path context.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Device failures reach the reconciler as transport errors.
impl From<Error> for declarative::Error {
    fn from(err: Error) -> Self {
        declarative::Error::transport(err)
    }
}
