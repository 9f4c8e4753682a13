//! Device config (`device.conf`) parsing and target resolution.
//!
//! ```text
//! # comment
//! [the_node]
//! type test_device
//! url  file:///etc/credentials.txt
//! debug
//! ```

use crate::error::{Error, Result};
use crate::types::DeviceEntry;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\s*([^\]\s]+)\s*\]$").expect("SECTION_RE is a valid regex pattern")
});

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]+)(?:\s+(.*))?$").expect("DIRECTIVE_RE is a valid regex pattern")
});

/// Parsed device config
#[derive(Debug, Clone, Default)]
pub struct DeviceConfig {
    source: Option<PathBuf>,
    entries: Vec<DeviceEntry>,
}

/// Section being parsed
struct Pending {
    name: String,
    line: usize,
    device_type: Option<String>,
    url: Option<String>,
    debug: bool,
}

impl Pending {
    fn finish(self) -> Result<DeviceEntry> {
        let device_type = self
            .device_type
            .ok_or_else(|| Error::parse(self.line, format!("device '{}' has no type", self.name)))?;
        let url = self
            .url
            .ok_or_else(|| Error::parse(self.line, format!("device '{}' has no url", self.name)))?;
        Ok(DeviceEntry {
            name: self.name,
            device_type,
            url,
            debug: self.debug,
        })
    }
}

impl DeviceConfig {
    /// Parse device config text
    pub fn parse(content: &str) -> Result<Self> {
        let mut entries: Vec<DeviceEntry> = Vec::new();
        let mut current: Option<Pending> = None;

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(caps) = SECTION_RE.captures(line) {
                if let Some(pending) = current.take() {
                    push_entry(&mut entries, pending.finish()?)?;
                }
                current = Some(Pending {
                    name: caps[1].to_string(),
                    line: line_no,
                    device_type: None,
                    url: None,
                    debug: false,
                });
                continue;
            }

            let Some(caps) = DIRECTIVE_RE.captures(line) else {
                return Err(Error::parse(line_no, format!("cannot parse '{line}'")));
            };
            let Some(pending) = current.as_mut() else {
                return Err(Error::parse(
                    line_no,
                    "directive outside of a device section",
                ));
            };

            let key = &caps[1];
            let value = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
            match key {
                "type" | "url" if value.is_empty() => {
                    return Err(Error::parse(line_no, format!("'{key}' needs a value")));
                }
                "type" => pending.device_type = Some(value.to_string()),
                "url" => pending.url = Some(value.to_string()),
                "debug" => pending.debug = true,
                other => {
                    return Err(Error::parse(line_no, format!("unknown directive '{other}'")));
                }
            }
        }

        if let Some(pending) = current.take() {
            push_entry(&mut entries, pending.finish()?)?;
        }

        Ok(Self {
            source: None,
            entries,
        })
    }

    /// Load a device config file. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No device config at {}", path.display());
                Self::default()
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        config.source = Some(path.to_path_buf());
        log::debug!(
            "Loaded {} device(s) from {}",
            config.entries.len(),
            path.display()
        );
        Ok(config)
    }

    /// Look up a target by name
    pub fn resolve(&self, target: &str) -> Result<&DeviceEntry> {
        self.entries
            .iter()
            .find(|e| e.name == target)
            .ok_or_else(|| Error::TargetNotFound {
                target: target.to_string(),
                path: self
                    .source
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("device.conf")),
            })
    }

    pub fn entries(&self) -> &[DeviceEntry] {
        &self.entries
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn push_entry(entries: &mut Vec<DeviceEntry>, entry: DeviceEntry) -> Result<()> {
    if entries.iter().any(|e| e.name == entry.name) {
        return Err(Error::DuplicateTarget(entry.name));
    }
    entries.push(entry);
    Ok(())
}
