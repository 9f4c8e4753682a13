//! Device transports.
//!
//! A [`Device`] is both the [`StateFetcher`] and the [`Applier`] for one
//! target. [`connect`] picks the transport from the device-config entry.
//!
//! # Testing
//!
//! Use [`MemoryDevice`] for tests without a real target:
//!
//! ```
//! use declarative::{AttributeSet, ResourceId, StateFetcher};
//! use devicekit::backend::MemoryDevice;
//!
//! let device = MemoryDevice::test_device("the_node", "memory://lab");
//! let id = ResourceId::new("wibble").unwrap();
//! let attrs = device.fetch("device_provider", &id).unwrap();
//! assert_eq!(attrs.get("string").unwrap().to_string(), "sample");
//! ```

pub mod json_file;

pub use json_file::JsonFileDevice;

use crate::error::{Error, Result};
use crate::types::{DeviceEntry, JSON_FILE, TEST_DEVICE};
use declarative::{Applier, AttributeSet, Ensure, ResourceId, StateFetcher};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Fact values as reported by a device
pub type Facts = BTreeMap<String, serde_json::Value>;

/// Resources by type, then by title
pub type ResourceStore = BTreeMap<String, BTreeMap<String, AttributeSet>>;

const NAMEVAR: &str = "name";

/// One connected target.
pub trait Device: StateFetcher + Applier + std::fmt::Debug {
    /// Device-config name of this device.
    fn name(&self) -> &str;

    /// Url the device was reached at.
    fn url(&self) -> &str;

    /// Facts the device reports about itself.
    fn facts(&self) -> Result<Facts>;
}

/// Open a transport for a device-config entry.
///
/// # Errors
///
/// Returns `Error::UnsupportedDeviceType` for unknown device types and
/// `Error::InvalidUrl` when the url does not suit the transport.
pub fn connect(entry: &DeviceEntry) -> Result<Box<dyn Device>> {
    log::debug!("Connecting to {entry}");
    let endpoint = entry.endpoint()?;

    match entry.device_type.as_str() {
        TEST_DEVICE => Ok(Box::new(
            MemoryDevice::test_device(&entry.name, &entry.url).debug(entry.debug),
        )),
        JSON_FILE => {
            let path = endpoint
                .file_path()
                .ok_or_else(|| Error::InvalidUrl(entry.url.clone()))?;
            Ok(Box::new(
                JsonFileDevice::new(&entry.name, &entry.url, path).debug(entry.debug),
            ))
        }
        other => Err(Error::UnsupportedDeviceType {
            name: entry.name.clone(),
            device_type: other.to_string(),
        }),
    }
}

/// Transport-level log line; `debug` devices log at info.
pub(crate) fn trace_transport(debug: bool, device: &str, message: std::fmt::Arguments<'_>) {
    let level = if debug {
        log::Level::Info
    } else {
        log::Level::Debug
    };
    log::log!(level, "[{device}] {message}");
}

/// Apply a full target state to a resource store
pub(crate) fn store_target(
    store: &mut ResourceStore,
    resource_type: &str,
    id: &ResourceId,
    target: &AttributeSet,
) {
    if target.ensure() == Some(Ensure::Absent) {
        if let Some(resources) = store.get_mut(resource_type) {
            resources.remove(id.as_str());
        }
    } else {
        store
            .entry(resource_type.to_string())
            .or_default()
            .insert(id.to_string(), target.clone());
    }
}

/// Resources of one type, each carrying its store key as `name`
pub(crate) fn titled(resources: &BTreeMap<String, AttributeSet>) -> Vec<AttributeSet> {
    resources
        .iter()
        .map(|(title, attrs)| {
            if attrs.contains(NAMEVAR) {
                attrs.clone()
            } else {
                attrs.clone().with(NAMEVAR, title.as_str())
            }
        })
        .collect()
}

/// In-memory simulated appliance.
///
/// State lives only as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryDevice {
    name: String,
    url: String,
    debug: bool,
    resources: Mutex<ResourceStore>,
    facts: Facts,
}

impl MemoryDevice {
    /// Create an empty device.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Create the `test_device` appliance with its fixture state.
    ///
    /// Carries `device_provider "wibble"` with `string => "sample"` and the
    /// fact `foo => "bar"`.
    pub fn test_device(name: impl Into<String>, url: impl Into<String>) -> Self {
        let device = Self::new(name, url).with_fact("foo", "bar");
        device.insert(
            "device_provider",
            AttributeSet::new()
                .with("name", "wibble")
                .with("ensure", Ensure::Present)
                .with("string", "sample"),
        );
        device
    }

    /// Log every transport call at info level.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Add a fact.
    #[must_use]
    pub fn with_fact(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.facts.insert(name.into(), value.into());
        self
    }

    /// Store a resource as-is, keyed by its `name` attribute.
    pub fn insert(&self, resource_type: &str, attrs: AttributeSet) {
        let title = attrs.get(NAMEVAR).map(ToString::to_string).unwrap_or_default();
        self.store()
            .entry(resource_type.to_string())
            .or_default()
            .insert(title, attrs);
    }

    /// Current state of one resource, if present.
    pub fn get(&self, resource_type: &str, title: &str) -> Option<AttributeSet> {
        self.store()
            .get(resource_type)
            .and_then(|resources| resources.get(title))
            .cloned()
    }

    fn store(&self) -> MutexGuard<'_, ResourceStore> {
        self.resources.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StateFetcher for MemoryDevice {
    fn fetch(&self, resource_type: &str, id: &ResourceId) -> declarative::Result<AttributeSet> {
        trace_transport(
            self.debug,
            &self.name,
            format_args!("get {resource_type}[{id}]"),
        );
        self.get(resource_type, id.as_str())
            .ok_or_else(|| declarative::Error::not_found(resource_type, id.as_str()))
    }

    fn list(&self, resource_type: &str) -> declarative::Result<Vec<AttributeSet>> {
        trace_transport(self.debug, &self.name, format_args!("list {resource_type}"));
        Ok(self
            .store()
            .get(resource_type)
            .map(titled)
            .unwrap_or_default())
    }
}

impl Applier for MemoryDevice {
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
        store_target(&mut self.store(), resource_type, id, target);
        Ok(())
    }
}

impl Device for MemoryDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn facts(&self) -> Result<Facts> {
        Ok(self.facts.clone())
    }
}
