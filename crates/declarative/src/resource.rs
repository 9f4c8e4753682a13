//! Provider trait for resource types
//!
//! A provider owns one resource type: its schema, its canonical form, and
//! how it talks to the target through the collaborator traits.

use crate::context::{Applier, StateFetcher};
use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::types::{AttributeSet, ResourceId};
use std::collections::BTreeMap;
use std::fmt;

/// Core trait for resource types
///
/// # Example
///
/// ```ignore
/// use declarative::{AttributeDef, AttributeKind, AttributeSet, Provider, Schema, Value};
///
/// #[derive(Debug)]
/// struct Hostname { schema: Schema }
///
/// impl Provider for Hostname {
///     fn type_name(&self) -> &str { "hostname" }
///     fn description(&self) -> String { "The device hostname".into() }
///     fn schema(&self) -> &Schema { &self.schema }
///
///     fn normalize(&self, attrs: AttributeSet) -> AttributeSet {
///         // Hostnames compare case-insensitively
///         attrs
///             .into_iter()
///             .map(|(k, v)| match v {
///                 Value::Str(s) if k == "name" => (k, Value::Str(s.to_lowercase())),
///                 v => (k, v),
///             })
///             .collect()
///     }
/// }
/// ```
pub trait Provider: Send + Sync + fmt::Debug {
    /// Resource type name, e.g. "device_provider"
    fn type_name(&self) -> &str;

    /// Human-readable description of the type
    fn description(&self) -> String;

    /// Attribute schema
    fn schema(&self) -> &Schema;

    /// Provider-specific canonical form, applied after schema coercion.
    ///
    /// Must be idempotent and must not do I/O.
    fn normalize(&self, attrs: AttributeSet) -> AttributeSet {
        attrs
    }

    /// Canonical form of `attrs`
    ///
    /// Fails with `UnknownAttribute` or `InvalidValue` when `attrs` does not
    /// fit the schema.
    fn canonicalize(&self, attrs: &AttributeSet) -> Result<AttributeSet> {
        let coerced = self.schema().coerce(attrs)?;
        Ok(self.normalize(coerced))
    }

    /// Fetch one resource from the target
    fn fetch(&self, fetcher: &dyn StateFetcher, id: &ResourceId) -> Result<AttributeSet> {
        fetcher.fetch(self.type_name(), id)
    }

    /// Fetch every resource of this type from the target
    fn list(&self, fetcher: &dyn StateFetcher) -> Result<Vec<AttributeSet>> {
        fetcher.list(self.type_name())
    }

    /// Push the full canonical target state for one resource
    fn apply(&self, applier: &dyn Applier, id: &ResourceId, target: &AttributeSet) -> Result<()> {
        applier.set(self.type_name(), id, target)
    }
}

/// A boxed provider for type-erased storage
pub type BoxedProvider = Box<dyn Provider>;

/// Providers keyed by resource type name
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, BoxedProvider>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any existing one for the same type
    pub fn register(&mut self, provider: BoxedProvider) {
        self.providers
            .insert(provider.type_name().to_string(), provider);
    }

    pub fn get(&self, resource_type: &str) -> Option<&dyn Provider> {
        self.providers.get(resource_type).map(AsRef::as_ref)
    }

    /// Look up a provider, failing with `UnknownType`
    pub fn require(&self, resource_type: &str) -> Result<&dyn Provider> {
        self.get(resource_type)
            .ok_or_else(|| Error::UnknownType(resource_type.to_string()))
    }

    /// Registered type names, sorted
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Provider> {
        self.providers.values().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
