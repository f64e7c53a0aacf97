//! Schema facet references and typed object attributes.

use crate::ids::SchemaArn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed object template: a facet within a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaReference {
    pub schema_arn: SchemaArn,
    pub facet_name: String,
}

impl SchemaReference {
    #[must_use]
    pub fn new(schema_arn: SchemaArn, facet_name: impl Into<String>) -> Self {
        Self {
            schema_arn,
            facet_name: facet_name.into(),
        }
    }

    /// Key for the attribute `name` defined by this facet.
    #[must_use]
    pub fn attribute(&self, name: impl Into<String>) -> AttributeKey {
        AttributeKey {
            facet: self.clone(),
            name: name.into(),
        }
    }
}

/// Fully qualified attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeKey {
    pub facet: SchemaReference,
    pub name: String,
}

/// Typed attribute value as stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum AttributeValue {
    String(String),
    /// Decimal number, kept in its string form.
    Number(String),
    Boolean(bool),
}

impl AttributeValue {
    /// Returns the string payload if this is a string value.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) | AttributeValue::Number(s) => f.write_str(s),
            AttributeValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// An attribute key paired with its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeKV {
    pub key: AttributeKey,
    pub value: AttributeValue,
}

impl AttributeKV {
    /// String attribute `name` on `facet`.
    #[must_use]
    pub fn string(facet: &SchemaReference, name: &str, value: impl Into<String>) -> Self {
        Self {
            key: facet.attribute(name),
            value: AttributeValue::String(value.into()),
        }
    }
}
