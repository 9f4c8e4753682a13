//! Device whose state lives in a JSON document.
//!
//! ```json
//! {
//!   "facts": { "os": "lab" },
//!   "resources": {
//!     "device_provider": {
//!       "wibble": { "name": "wibble", "ensure": "present", "string": "sample" }
//!     }
//!   }
//! }
//! ```
//!
//! A missing document is an empty device. Every write replaces the document
//! atomically (uniquely named temp file + rename).

use super::{Device, Facts, ResourceStore, store_target, titled, trace_transport};
use crate::error::{Error, Result};
use declarative::{Applier, AttributeSet, ResourceId, StateFetcher};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    facts: Facts,
    #[serde(default)]
    resources: ResourceStore,
}

/// File-backed device
#[derive(Debug)]
pub struct JsonFileDevice {
    name: String,
    url: String,
    path: PathBuf,
    debug: bool,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileDevice {
    pub fn new(name: impl Into<String>, url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            path: path.into(),
            debug: false,
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Document> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| Error::json(&self.path, e))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::default()),
            Err(e) => Err(Error::io(&self.path, e)),
        }
    }

    fn save(&self, document: &Document) -> Result<()> {
        let content =
            serde_json::to_string_pretty(document).map_err(|e| Error::json(&self.path, e))?;

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

        // Removed on drop unless persisted
        let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        let temp_path = file.path().to_path_buf();
        file.write_all(content.as_bytes())
            .and_then(|()| file.write_all(b"\n"))
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| Error::io(&temp_path, e))?;

        file.persist(&self.path)
            .map_err(|e| Error::io(&self.path, e.error))?;
        log::debug!("Saved device state to {}", self.path.display());
        Ok(())
    }
}

impl StateFetcher for JsonFileDevice {
    fn fetch(&self, resource_type: &str, id: &ResourceId) -> declarative::Result<AttributeSet> {
        trace_transport(
            self.debug,
            &self.name,
            format_args!("get {resource_type}[{id}]"),
        );
        self.load()?
            .resources
            .get(resource_type)
            .and_then(|resources| resources.get(id.as_str()))
            .cloned()
            .ok_or_else(|| declarative::Error::not_found(resource_type, id.as_str()))
    }

    fn list(&self, resource_type: &str) -> declarative::Result<Vec<AttributeSet>> {
        trace_transport(self.debug, &self.name, format_args!("list {resource_type}"));
        Ok(self
            .load()?
            .resources
            .get(resource_type)
            .map(titled)
            .unwrap_or_default())
    }
}

impl Applier for JsonFileDevice {
    fn set(
        &self,
        resource_type: &str,
        id: &ResourceId,
        target: &AttributeSet,
    ) -> declarative::Result<()> {
        trace_transport(
            self.debug,
            &self.name,
            format_args!("set {resource_type}[{id}]"),
        );
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut document = self.load()?;
        store_target(&mut document.resources, resource_type, id, target);
        self.save(&document)?;
        Ok(())
    }
}

impl Device for JsonFileDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn facts(&self) -> Result<Facts> {
        Ok(self.load()?.facts)
    }
}
