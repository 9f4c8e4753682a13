//! notify - log a message on every run
//!
//! Never present on a device, so applying it always defines `message`.

use declarative::{
    Applier, AttributeDef, AttributeKind, AttributeSet, DefaultValue, Provider, ResourceId,
    Result, Schema, StateFetcher,
};

#[derive(Debug)]
pub struct Notify {
    schema: Schema,
}

impl Notify {
    pub fn new() -> Self {
        Self {
            schema: Schema::new("notify").attribute(
                AttributeDef::new("message", AttributeKind::String)
                    .default_value(DefaultValue::Namevar)
                    .doc("Message to log; defaults to the title"),
            ),
        }
    }
}

impl Default for Notify {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for Notify {
    fn type_name(&self) -> &str {
        "notify"
    }

    fn description(&self) -> String {
        "Sends a message to the run log".to_string()
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn fetch(&self, _fetcher: &dyn StateFetcher, id: &ResourceId) -> Result<AttributeSet> {
        Err(declarative::Error::not_found(self.type_name(), id.as_str()))
    }

    fn list(&self, _fetcher: &dyn StateFetcher) -> Result<Vec<AttributeSet>> {
        Ok(Vec::new())
    }

    fn apply(&self, _applier: &dyn Applier, id: &ResourceId, target: &AttributeSet) -> Result<()> {
        if let Some(message) = target.get("message") {
            log::info!("notify[{id}]: {message}");
        }
        Ok(())
    }
}
