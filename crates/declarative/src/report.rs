//! Structured outcomes and their text rendering
//!
//! The reconciler only ever produces [`Event`] values. Their `Display`
//! output is a compatibility contract: scripts and acceptance suites match
//! on these lines byte for byte, so the formats below must not drift.

use crate::diff::Change;
use crate::schema::Schema;
use crate::types::{AttributeSet, Value};
use serde::Serialize;
use std::fmt;

/// Severity of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Level {
    Info,
    Notice,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Notice => "Notice",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }

    /// Whether this level belongs on the diagnostic stream
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A target returned state that its own canonicalizer would rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub resource_type: String,
    pub resource_id: String,
    pub returned: AttributeSet,
    pub canonicalized: AttributeSet,
    /// Attribute order used when rendering both maps
    pub order: Vec<String>,
}

impl Violation {
    pub fn new(
        schema: &Schema,
        resource_id: impl Into<String>,
        returned: AttributeSet,
        canonicalized: AttributeSet,
    ) -> Self {
        Self {
            resource_type: schema.type_name().to_string(),
            resource_id: resource_id.into(),
            returned,
            canonicalized,
            order: schema.order(),
        }
    }

    /// Attributes whose value the canonicalizer changed
    pub fn differing_attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .returned
            .keys()
            .chain(self.canonicalized.keys())
            .map(String::as_str)
            .filter(|k| self.returned.get(k) != self.canonicalized.get(k))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]#get has not provided canonicalized values.\n\
             Returned values:       {}\n\
             Canonicalized values:  {}",
            self.resource_type,
            self.resource_id,
            map_repr(&self.order, &self.returned),
            map_repr(&self.order, &self.canonicalized),
        )
    }
}

/// One attribute change on one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub resource_type: String,
    pub resource_id: String,
    pub change: Change,
}

impl ChangeRecord {
    fn path(&self) -> String {
        format!(
            "/{}[{}]/{}",
            capitalize_type(&self.resource_type),
            self.resource_id,
            self.change.attribute
        )
    }
}

/// Structured outcome destined for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Event {
    /// An attribute was set or changed
    Change(ChangeRecord),
    /// An attribute would change, but the run is a noop
    NoopChange(ChangeRecord),
    /// Non-fatal canonicalization violation
    Warning(Violation),
    /// The resource could not be reconciled
    Failed {
        resource_type: String,
        resource_id: String,
        message: String,
    },
    Info(String),
}

impl Event {
    pub fn level(&self) -> Level {
        match self {
            Self::Change(_) | Self::NoopChange(_) => Level::Notice,
            Self::Warning(_) => Level::Warning,
            Self::Failed { .. } => Level::Error,
            Self::Info(_) => Level::Info,
        }
    }

    /// The line without its level prefix
    pub fn message(&self) -> String {
        match self {
            Self::Change(record) => {
                let change = &record.change;
                if change.is_definition() {
                    format!(
                        "{}: defined '{}' as '{}'",
                        record.path(),
                        change.attribute,
                        change.new
                    )
                } else {
                    format!(
                        "{}: {} changed '{}' to '{}'",
                        record.path(),
                        change.attribute,
                        change.old.as_ref().map(Value::to_string).unwrap_or_default(),
                        change.new
                    )
                }
            }
            Self::NoopChange(record) => {
                let change = &record.change;
                format!(
                    "{}: current_value '{}', should be '{}' (noop)",
                    record.path(),
                    change
                        .old
                        .as_ref()
                        .map_or_else(|| "absent".to_string(), Value::to_string),
                    change.new
                )
            }
            Self::Warning(violation) => violation.to_string(),
            Self::Failed {
                resource_type,
                resource_id,
                message,
            } => format!(
                "/{}[{}]: Could not evaluate: {}",
                capitalize_type(resource_type),
                resource_id,
                message
            ),
            Self::Info(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level(), self.message())
    }
}

/// Capitalize each `::`-separated segment of a type name
pub fn capitalize_type(type_name: &str) -> String {
    type_name
        .split("::")
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("::")
}

/// Inspection form of an attribute map: `{:name=>"wibble", :ensure=>:present}`
pub fn map_repr(order: &[String], attrs: &AttributeSet) -> String {
    let mut keys: Vec<&str> = order
        .iter()
        .map(String::as_str)
        .filter(|k| attrs.contains(k))
        .collect();
    let mut rest: Vec<&str> = attrs
        .keys()
        .map(String::as_str)
        .filter(|k| !order.iter().any(|o| o == k))
        .collect();
    rest.sort_unstable();
    keys.extend(rest);

    let pairs: Vec<String> = keys
        .iter()
        .filter_map(|k| attrs.get(k).map(|v| format!(":{}=>{}", k, v.inspect())))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

/// Render a resource as a listing block.
///
/// ```text
/// device_provider { "wibble":
///   ensure => 'present',
///   string => 'sample',
/// }
/// ```
///
/// Attributes are sorted by name, the namevar is the title, and keys are
/// padded so the arrows line up.
pub fn render_resource(schema: &Schema, attrs: &AttributeSet) -> String {
    let title = attrs
        .get(schema.namevar())
        .map(Value::to_string)
        .unwrap_or_default();
    let body: Vec<(&String, &Value)> = attrs
        .iter()
        .filter(|(k, _)| k.as_str() != schema.namevar())
        .collect();
    let width = body.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

    let mut out = format!("{} {{ \"{}\": \n", schema.type_name(), title);
    for (key, value) in body {
        out.push_str(&format!(
            "  {:<width$} => '{}',\n",
            key,
            quote(&value.to_string()),
            width = width
        ));
    }
    out.push('}');
    out
}

fn quote(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeDef, AttributeKind};
    use crate::types::Ensure;

    fn schema() -> Schema {
        Schema::new("device_provider")
            .ensurable()
            .attribute(AttributeDef::new("string", AttributeKind::String))
    }

    fn wibble(string: &str) -> AttributeSet {
        AttributeSet::new()
            .with("name", "wibble")
            .with("ensure", Ensure::Present)
            .with("string", string)
    }

    fn record(attribute: &str, old: Option<Value>, new: Value) -> ChangeRecord {
        ChangeRecord {
            resource_type: "device_provider".into(),
            resource_id: "foo".into(),
            change: Change::new(attribute, old, new),
        }
    }

    #[test]
    fn test_capitalize_type() {
        assert_eq!(capitalize_type("device_provider"), "Device_provider");
        assert_eq!(capitalize_type("cisco::interface"), "Cisco::Interface");
        assert_eq!(capitalize_type(""), "");
    }

    #[test]
    fn test_definition_notice() {
        let event = Event::Change(record(
            "ensure",
            Some(Value::Ensure(Ensure::Absent)),
            Value::Ensure(Ensure::Present),
        ));
        assert_eq!(
            event.to_string(),
            "Notice: /Device_provider[foo]/ensure: defined 'ensure' as 'present'"
        );
    }

    #[test]
    fn test_change_notice() {
        let event = Event::Change(ChangeRecord {
            resource_type: "device_provider".into(),
            resource_id: "wibble".into(),
            change: Change::new("string", Some(Value::str("sample")), Value::str("changed")),
        });
        assert_eq!(
            event.to_string(),
            "Notice: /Device_provider[wibble]/string: string changed 'sample' to 'changed'"
        );
    }

    #[test]
    fn test_noop_notice() {
        let event = Event::NoopChange(record("string", None, Value::str("hello")));
        assert_eq!(
            event.to_string(),
            "Notice: /Device_provider[foo]/string: current_value 'absent', should be 'hello' (noop)"
        );
    }

    #[test]
    fn test_warning_golden() {
        let violation = Violation::new(&schema(), "wibble", wibble("sample"), wibble("changed"));
        let event = Event::Warning(violation);

        assert_eq!(event.level(), Level::Warning);
        assert_eq!(
            event.to_string(),
            "Warning: device_provider[wibble]#get has not provided canonicalized values.\n\
             Returned values:       {:name=>\"wibble\", :ensure=>:present, :string=>\"sample\"}\n\
             Canonicalized values:  {:name=>\"wibble\", :ensure=>:present, :string=>\"changed\"}"
        );
    }

    #[test]
    fn test_error_golden() {
        let violation = Violation::new(&schema(), "wibble", wibble("sample"), wibble("changed"));
        let event = Event::Failed {
            resource_type: "device_provider".into(),
            resource_id: "wibble".into(),
            message: violation.to_string(),
        };

        let rendered = event.to_string();
        assert!(rendered.starts_with(
            "Error: /Device_provider[wibble]: Could not evaluate: \
             device_provider[wibble]#get has not provided canonicalized values.\n"
        ));
        assert!(rendered.ends_with(
            "Canonicalized values:  {:name=>\"wibble\", :ensure=>:present, :string=>\"changed\"}"
        ));
    }

    #[test]
    fn test_violation_differing_attributes() {
        let violation = Violation::new(&schema(), "wibble", wibble("sample"), wibble("changed"));
        assert_eq!(violation.differing_attributes(), vec!["string"]);
    }

    #[test]
    fn test_render_resource_golden() {
        assert_eq!(
            render_resource(&schema(), &wibble("sample")),
            "device_provider { \"wibble\": \n  ensure => 'present',\n  string => 'sample',\n}"
        );
    }

    #[test]
    fn test_render_resource_pads_and_escapes() {
        let schema = schema().attribute(AttributeDef::new("description", AttributeKind::String));
        let attrs = AttributeSet::new()
            .with("name", "eth0")
            .with("ensure", Ensure::Present)
            .with("description", "it's up");

        assert_eq!(
            render_resource(&schema, &attrs),
            "device_provider { \"eth0\": \n  description => 'it\\'s up',\n  ensure      => 'present',\n}"
        );
    }

    #[test]
    fn test_map_repr_unknown_keys_last() {
        let attrs = wibble("sample").with("extra", 3);
        assert_eq!(
            map_repr(&schema().order(), &attrs),
            "{:name=>\"wibble\", :ensure=>:present, :string=>\"sample\", :extra=>3}"
        );
    }
}
