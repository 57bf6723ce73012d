//! Firestore's typed value encoding.
//!
//! The REST API wraps every field in a single-key object naming its type
//! (`{"stringValue": "x"}`, `{"integerValue": "42"}`, …). Integers travel
//! as strings. Timestamps are RFC 3339 strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sprout_domain::time::Timestamp;

use crate::error::FirestoreError;

/// One typed Firestore value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    #[serde(rename = "stringValue")]
    String(String),
    #[serde(rename = "integerValue", with = "int_as_string")]
    Integer(i64),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    #[serde(rename = "timestampValue")]
    Timestamp(Timestamp),
    #[serde(rename = "nullValue")]
    Null(()),
    #[serde(rename = "mapValue")]
    Map(MapValue),
    #[serde(rename = "arrayValue")]
    Array(ArrayValue),
}

/// Wrapper around nested fields, as the API nests them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

/// Wrapper around a value list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::Integer(value)
    }

    #[must_use]
    pub fn double(value: f64) -> Self {
        Self::Double(value)
    }

    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::Boolean(value)
    }

    #[must_use]
    pub fn timestamp(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }

    #[must_use]
    pub fn array(values: Vec<Value>) -> Self {
        Self::Array(ArrayValue { values })
    }

    #[must_use]
    pub fn map(fields: BTreeMap<String, Value>) -> Self {
        Self::Map(MapValue { fields })
    }
}

mod int_as_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A Firestore document: server-assigned resource name plus typed fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Full resource name; absent on documents built for upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Document {
    /// Build a document for upload from its fields.
    #[must_use]
    pub fn from_fields(fields: BTreeMap<String, Value>) -> Self {
        Self { name: None, fields }
    }

    fn missing(&self, field: &str) -> FirestoreError {
        FirestoreError::Decode(format!("missing or mistyped field `{field}`"))
    }

    /// Required string field.
    pub fn get_str(&self, field: &str) -> Result<&str, FirestoreError> {
        match self.fields.get(field) {
            Some(Value::String(value)) => Ok(value),
            _ => Err(self.missing(field)),
        }
    }

    /// Optional string field; `None` when absent or null.
    #[must_use]
    pub fn get_opt_str(&self, field: &str) -> Option<&str> {
        match self.fields.get(field) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Required integer field.
    pub fn get_i64(&self, field: &str) -> Result<i64, FirestoreError> {
        match self.fields.get(field) {
            Some(Value::Integer(value)) => Ok(*value),
            _ => Err(self.missing(field)),
        }
    }

    /// Optional integer field; `None` when absent or null.
    #[must_use]
    pub fn get_opt_i64(&self, field: &str) -> Option<i64> {
        match self.fields.get(field) {
            Some(Value::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    /// Required double field; integers are widened.
    pub fn get_f64(&self, field: &str) -> Result<f64, FirestoreError> {
        match self.fields.get(field) {
            Some(Value::Double(value)) => Ok(*value),
            #[allow(clippy::cast_precision_loss)]
            Some(Value::Integer(value)) => Ok(*value as f64),
            _ => Err(self.missing(field)),
        }
    }

    /// Optional double field; `None` when absent or null.
    #[must_use]
    pub fn get_opt_f64(&self, field: &str) -> Option<f64> {
        match self.fields.get(field) {
            Some(Value::Double(value)) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            Some(Value::Integer(value)) => Some(*value as f64),
            _ => None,
        }
    }

    /// Required boolean field.
    pub fn get_bool(&self, field: &str) -> Result<bool, FirestoreError> {
        match self.fields.get(field) {
            Some(Value::Boolean(value)) => Ok(*value),
            _ => Err(self.missing(field)),
        }
    }

    /// Required timestamp field.
    pub fn get_timestamp(&self, field: &str) -> Result<Timestamp, FirestoreError> {
        match self.fields.get(field) {
            Some(Value::Timestamp(value)) => Ok(*value),
            _ => Err(self.missing(field)),
        }
    }

    /// Required array field.
    pub fn get_array(&self, field: &str) -> Result<&[Value], FirestoreError> {
        match self.fields.get(field) {
            Some(Value::Array(array)) => Ok(&array.values),
            _ => Err(self.missing(field)),
        }
    }

    /// Last path segment of the resource name, i.e. the document id.
    #[must_use]
    pub fn doc_id(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|name| name.rsplit('/').next())
    }
}
