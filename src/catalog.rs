//! Catalog files handed to `rigging device --apply`
//!
//! ```toml
//! [[resource]]
//! type = "device_provider"
//! title = "wibble"
//! attributes = { ensure = "present", string = "changed" }
//!
//! [[resource]]
//! type = "notify"
//! title = "done"
//! ```
//!
//! The same shape is accepted as JSON when the file ends in `.json`.

use anyhow::{Context, Result};
use declarative::{AttributeSet, Catalog, ResourceId, ResourceRequest};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn detect(path: &Path) -> Self {
        if path.extension().is_some_and(|e| e == "json") {
            Self::Json
        } else {
            Self::Toml
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default, alias = "resources")]
    resource: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Entry {
    #[serde(rename = "type")]
    resource_type: String,
    title: String,
    #[serde(default)]
    attributes: AttributeSet,
}

/// Parse catalog text in the given format
fn parse(content: &str, format: Format) -> Result<Catalog> {
    let file: CatalogFile = match format {
        Format::Toml => toml::from_str(content).context("Invalid TOML catalog")?,
        Format::Json => serde_json::from_str(content).context("Invalid JSON catalog")?,
    };

    file.resource
        .into_iter()
        .map(|entry| {
            let id = ResourceId::new(&entry.title)
                .with_context(|| format!("Bad title for {} resource", entry.resource_type))?;
            Ok(ResourceRequest::new(entry.resource_type, id, entry.attributes))
        })
        .collect()
}

/// Load a catalog file; the format follows the extension
pub fn load(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read catalog {}", path.display()))?;
    let catalog = parse(&content, Format::detect(path))
        .with_context(|| format!("Could not load catalog {}", path.display()))?;
    log::debug!(
        "Loaded {} resource(s) from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}
