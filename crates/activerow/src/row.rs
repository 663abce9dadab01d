//! Ordered field maps for fetched and in-flight rows.

use crate::error::{OrmError, OrmResult};
use crate::value::Value;

/// A single database row: field names mapped to values, in column order.
///
/// Insertion order is preserved so statements synthesized from a row list
/// fields deterministically. Lookup is linear; rows carry a handful of
/// fields, not hundreds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from (name, value) pairs, keeping their order.
    pub fn from_pairs<N: Into<String>>(pairs: Vec<(N, Value)>) -> Self {
        Self {
            fields: pairs.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get a value by field name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Check if a field exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Write a field. An existing field keeps its position; a new field
    /// appends.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Get a typed value by field name. Missing fields and type mismatches
    /// both surface as decode errors naming the field.
    pub fn get_as<T: FromValue>(&self, name: &str) -> OrmResult<T> {
        let value = self
            .get(name)
            .ok_or_else(|| OrmError::decode(name, "field not present"))?;
        T::from_value(value).map_err(|e| match e {
            OrmError::Decode { message, .. } => OrmError::decode(name, message),
            e => e,
        })
    }

    /// Iterate over (name, value) pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Consume the row into its ordered pairs.
    pub fn into_pairs(self) -> Vec<(String, Value)> {
        self.fields
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Conversion from a borrowed [`Value`] into a typed field value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> OrmResult<Self>;
}

impl FromValue for bool {
    fn from_value(value: &Value) -> OrmResult<Self> {
        value
            .as_bool()
            .ok_or_else(|| OrmError::decode("", format!("{} is not a boolean", value.type_name())))
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> OrmResult<Self> {
        value
            .as_i64()
            .ok_or_else(|| OrmError::decode("", format!("{} is not an integer", value.type_name())))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> OrmResult<Self> {
        value
            .as_f64()
            .ok_or_else(|| OrmError::decode("", format!("{} is not a float", value.type_name())))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> OrmResult<Self> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            _ => Err(OrmError::decode(
                "",
                format!("{} is not text", value.type_name()),
            )),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> OrmResult<Self> {
        value
            .as_bytes()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| OrmError::decode("", format!("{} is not binary", value.type_name())))
    }
}

impl FromValue for serde_json::Value {
    fn from_value(value: &Value) -> OrmResult<Self> {
        match value {
            Value::Json(v) => Ok(v.clone()),
            Value::Text(s) => serde_json::from_str(s)
                .map_err(|e| OrmError::decode("", format!("invalid JSON: {}", e))),
            _ => Err(OrmError::decode(
                "",
                format!("{} is not JSON", value.type_name()),
            )),
        }
    }
}

impl FromValue for uuid::Uuid {
    fn from_value(value: &Value) -> OrmResult<Self> {
        match value {
            Value::Uuid(u) => Ok(*u),
            Value::Text(s) => uuid::Uuid::parse_str(s)
                .map_err(|e| OrmError::decode("", format!("invalid UUID: {}", e))),
            _ => Err(OrmError::decode(
                "",
                format!("{} is not a UUID", value.type_name()),
            )),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> OrmResult<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> OrmResult<Self> {
        Ok(value.clone())
    }
}
