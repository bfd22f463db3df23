use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::PayloadError;

/// One loosely-typed sub-record of a payload.
///
/// Lookups never fail: a missing key, a `null` or a value of the wrong type
/// simply reads as absent, so every fallback chain can be written as a plain
/// `or_else` sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-blank string, or a number rendered the way JSON writes it.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_text)
    }

    /// Non-blank string only. Numbers read as absent.
    pub fn string(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    }

    /// First key in `keys` that yields [`Record::text`].
    pub fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// `true` only for a literal JSON `true`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Value::Bool(true)))
    }

    pub fn truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    /// Strict numeric lookup. Strings are not coerced.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Numeric lookup that also accepts strings such as `"0.75"`.
    pub fn numeric(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Nested object at `key`, or an empty record.
    pub fn nested(&self, key: &str) -> Record {
        match self.get(key) {
            Some(Value::Object(map)) => Record(map.clone()),
            _ => Record::new(),
        }
    }

    /// Nested object at `key` when it really is an object.
    pub fn object(&self, key: &str) -> Option<Record> {
        match self.get(key) {
            Some(Value::Object(map)) => Some(Record(map.clone())),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Input to the composer: four optional sub-records, each defaulting to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Payload {
    pub summary: Record,
    pub task: Record,
    pub routing: Record,
    pub execution_status: Record,
}

impl Payload {
    /// Strict shape check: the value must be an object and every present,
    /// non-null sub-record must be an object too. Unknown keys are ignored.
    pub fn from_value(value: &Value) -> Result<Self, PayloadError> {
        let Value::Object(root) = value else {
            return Err(PayloadError::NotAnObject {
                found: json_kind(value),
            });
        };

        let section = |name: &'static str| match root.get(name) {
            None | Some(Value::Null) => Ok(Record::new()),
            Some(Value::Object(map)) => Ok(Record(map.clone())),
            Some(other) => Err(PayloadError::InvalidSection {
                section: name,
                found: json_kind(other),
            }),
        };

        Ok(Self {
            summary: section("summary")?,
            task: section("task")?,
            routing: section("routing")?,
            execution_status: section("execution_status")?,
        })
    }

    /// Shape-tolerant variant: anything that is not an object reads as empty.
    pub fn from_value_lossy(value: &Value) -> Self {
        let section = |name: &str| match value.get(name) {
            Some(Value::Object(map)) => Record(map.clone()),
            _ => Record::new(),
        };
        Self {
            summary: section("summary"),
            task: section("task"),
            routing: section("routing"),
            execution_status: section("execution_status"),
        }
    }

    /// Canonical bytes used for stable trace ids. Keys are sorted because
    /// `serde_json::Map` is ordered.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<&Value> for Payload {
    type Error = PayloadError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
