//! device_provider - fixture type for exercising canonicalization
//!
//! Its canonical form always carries `string => "changed"`, so any device
//! that reports another value returns non-canonical state.

use declarative::{AttributeDef, AttributeKind, AttributeSet, Provider, Schema};

/// Value every canonical `string` attribute has
pub const CANONICAL_STRING: &str = "changed";

#[derive(Debug)]
pub struct DeviceProvider {
    schema: Schema,
}

impl DeviceProvider {
    pub fn new() -> Self {
        Self {
            schema: Schema::new("device_provider").ensurable().attribute(
                AttributeDef::new("string", AttributeKind::String)
                    .doc("Free-form text; canonicalized to \"changed\""),
            ),
        }
    }
}

impl Default for DeviceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for DeviceProvider {
    fn type_name(&self) -> &str {
        "device_provider"
    }

    fn description(&self) -> String {
        "Test resource whose canonical form rewrites `string`".to_string()
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn normalize(&self, attrs: AttributeSet) -> AttributeSet {
        if attrs.contains("string") {
            attrs.with("string", CANONICAL_STRING)
        } else {
            attrs
        }
    }
}
