use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::city::CityRecord;
use crate::errors::ModelError;

/// The whole persisted document: record key -> record value.
///
/// Values are kept as raw JSON so the store never rejects or rewrites
/// entries it does not understand.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCollection(Map<String, Value>);

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a document. Empty (or whitespace-only) input is an empty collection.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new());
        }
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ModelError::NotAnObject(kind(&other))),
        }
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, ModelError> {
        Ok(serde_json::to_vec(&self.0)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Typed view of each entry; entries that are not city records yield an error.
    pub fn cities(&self) -> impl Iterator<Item = (&str, Result<CityRecord, ModelError>)> {
        self.0.iter().map(|(key, value)| {
            let rec = CityRecord::deserialize(value).map_err(|source| ModelError::Record {
                key: key.clone(),
                source,
            });
            (key.as_str(), rec)
        })
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RecordCollection {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl IntoIterator for RecordCollection {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
