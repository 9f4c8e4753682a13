//! Core types for device targeting.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Device type served by the in-memory simulated appliance.
pub const TEST_DEVICE: &str = "test_device";

/// Device type whose state lives in a JSON document.
pub const JSON_FILE: &str = "json_file";

/// One `[name]` section of a device config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    /// Section name, used as the `--target` value.
    pub name: String,
    /// Transport to use, e.g. `test_device`.
    pub device_type: String,
    /// Where the device is reached.
    pub url: String,
    /// Verbose transport logging for this device.
    #[serde(default)]
    pub debug: bool,
}

impl DeviceEntry {
    pub fn new(
        name: impl Into<String>,
        device_type: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            device_type: device_type.into(),
            url: url.into(),
            debug: false,
        }
    }

    /// Simulated device used when no target is named.
    #[must_use]
    pub fn local() -> Self {
        Self::new("localhost", TEST_DEVICE, "memory://localhost")
    }

    /// Parsed form of `url`.
    pub fn endpoint(&self) -> Result<Endpoint> {
        Endpoint::parse(&self.url)
    }
}

impl fmt::Display for DeviceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) at {}", self.name, self.device_type, self.url)
    }
}

/// A `scheme://location` device url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: String,
    /// Everything after `://`.
    pub location: String,
}

impl Endpoint {
    /// Split a url into scheme and location.
    ///
    /// The scheme must start with a letter and contain only letters, digits,
    /// `+`, `-` or `.`; the location must not be empty.
    pub fn parse(url: &str) -> Result<Self> {
        let (scheme, location) = url
            .split_once("://")
            .ok_or_else(|| Error::InvalidUrl(url.to_string()))?;

        let valid_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !valid_scheme || location.is_empty() {
            return Err(Error::InvalidUrl(url.to_string()));
        }

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            location: location.to_string(),
        })
    }

    /// Local filesystem path for `file://` urls.
    pub fn file_path(&self) -> Option<PathBuf> {
        (self.scheme == "file").then(|| PathBuf::from(&self.location))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.location)
    }
}
