//! Attribute schema for a resource type
//!
//! The schema is the static half of canonicalization: it knows which
//! attributes exist, what kind of value each one holds, and how plain text
//! turns into that kind. Provider-specific normalization runs after it.

use crate::error::{Error, Result};
use crate::types::{AttributeSet, ENSURE, Ensure, Value};

/// Kind of value an attribute holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    String,
    /// The reserved presence attribute
    Ensure,
    /// Symbol-like value from a fixed list
    Enum(&'static [&'static str]),
    Integer,
    Boolean,
}

impl AttributeKind {
    /// Human-readable description of accepted values
    pub fn describe(&self) -> String {
        match self {
            Self::String => "a string".to_string(),
            Self::Ensure => "present or absent".to_string(),
            Self::Enum(allowed) => format!("one of {}", allowed.join(", ")),
            Self::Integer => "an integer".to_string(),
            Self::Boolean => "a boolean".to_string(),
        }
    }

    /// Convert a value into this kind's canonical variant.
    ///
    /// Returns `None` when the value cannot be represented. Already-coerced
    /// values map to themselves.
    pub fn coerce(&self, value: &Value) -> Option<Value> {
        match self {
            Self::String => Some(match value {
                Value::Str(s) => Value::Str(s.clone()),
                other => Value::Str(other.to_string()),
            }),
            Self::Ensure => match value {
                Value::Ensure(e) => Some(Value::Ensure(*e)),
                Value::Str(s) | Value::Enum(s) => s.parse::<Ensure>().ok().map(Value::Ensure),
                _ => None,
            },
            Self::Enum(allowed) => match value {
                Value::Str(s) | Value::Enum(s) if allowed.contains(&s.as_str()) => {
                    Some(Value::Enum(s.clone()))
                }
                _ => None,
            },
            Self::Integer => match value {
                Value::Int(i) => Some(Value::Int(*i)),
                Value::Str(s) => s.trim().parse::<i64>().ok().map(Value::Int),
                _ => None,
            },
            Self::Boolean => match value {
                Value::Bool(b) => Some(Value::Bool(*b)),
                Value::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" => Some(Value::Bool(true)),
                    "false" | "no" => Some(Value::Bool(false)),
                    _ => None,
                },
                _ => None,
            },
        }
    }
}

/// Default used when a managed resource leaves an attribute unset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    Value(Value),
    /// Copy the resource title
    Namevar,
}

/// Declaration of a single attribute
#[derive(Debug, Clone)]
pub struct AttributeDef {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub default: Option<DefaultValue>,
    pub doc: &'static str,
}

impl AttributeDef {
    pub fn new(name: &'static str, kind: AttributeKind) -> Self {
        Self {
            name,
            kind,
            default: None,
            doc: "",
        }
    }

    pub fn doc(mut self, doc: &'static str) -> Self {
        self.doc = doc;
        self
    }

    pub fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }
}

/// Attribute schema of one resource type
#[derive(Debug, Clone)]
pub struct Schema {
    type_name: String,
    namevar: &'static str,
    attributes: Vec<AttributeDef>,
}

impl Schema {
    /// Create a schema whose first attribute is the `name` namevar
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            namevar: "name",
            attributes: vec![
                AttributeDef::new("name", AttributeKind::String)
                    .doc("The name of the resource you want to manage."),
            ],
        }
    }

    /// Declare the `ensure` attribute
    pub fn ensurable(self) -> Self {
        self.attribute(
            AttributeDef::new(ENSURE, AttributeKind::Ensure)
                .doc("Whether this resource should be present or absent on the target system."),
        )
    }

    /// Declare an attribute; later declarations with the same name replace earlier ones
    pub fn attribute(mut self, def: AttributeDef) -> Self {
        if let Some(pos) = self.attributes.iter().position(|a| a.name == def.name) {
            self.attributes[pos] = def;
        } else {
            self.attributes.push(def);
        }
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn namevar(&self) -> &'static str {
        self.namevar
    }

    pub fn attributes(&self) -> &[AttributeDef] {
        &self.attributes
    }

    pub fn attribute_def(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn has_ensure(&self) -> bool {
        self.attribute_def(ENSURE).is_some()
    }

    /// Validate keys and coerce every value into its declared kind
    pub fn coerce(&self, attrs: &AttributeSet) -> Result<AttributeSet> {
        attrs
            .iter()
            .map(|(name, value)| {
                let def = self
                    .attribute_def(name)
                    .ok_or_else(|| Error::UnknownAttribute {
                        resource_type: self.type_name.clone(),
                        attribute: name.clone(),
                    })?;
                let coerced = def.kind.coerce(value).ok_or_else(|| Error::InvalidValue {
                    resource_type: self.type_name.clone(),
                    attribute: name.clone(),
                    value: value.to_string(),
                    expected: def.kind.describe(),
                })?;
                Ok((name.clone(), coerced))
            })
            .collect()
    }

    /// Copy of `attrs` with declared defaults filled in for missing attributes
    pub fn with_defaults(&self, attrs: &AttributeSet) -> AttributeSet {
        let mut out = attrs.clone();
        for def in &self.attributes {
            if out.contains(def.name) {
                continue;
            }
            let value = match &def.default {
                Some(DefaultValue::Value(v)) => Some(v.clone()),
                Some(DefaultValue::Namevar) => attrs.get(self.namevar).cloned(),
                None => None,
            };
            if let Some(v) = value {
                out.insert(def.name, v);
            }
        }
        out
    }

    /// Attributes in declaration order, then any undeclared ones alphabetically
    pub fn ordered<'a>(&self, attrs: &'a AttributeSet) -> Vec<(&'a str, &'a Value)> {
        let mut out: Vec<(&str, &Value)> = Vec::with_capacity(attrs.len());
        for def in &self.attributes {
            if let Some((k, v)) = attrs.iter().find(|(k, _)| k.as_str() == def.name) {
                out.push((k.as_str(), v));
            }
        }
        for (k, v) in attrs.iter() {
            if self.attribute_def(k).is_none() {
                out.push((k.as_str(), v));
            }
        }
        out
    }

    /// Attribute names in declaration order
    pub fn order(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.name.to_string()).collect()
    }
}
