//! Options payload for a single output format
//!
//! The payload is kept as an opaque JSON value. R Markdown allows it to be a
//! mapping (`html_document: {toc: true}`), the string `default`, or empty.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Options configured for one output format (e.g. `html_document`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputOptions(Value);

impl OutputOptions {
    /// Create an empty options mapping
    pub fn new() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Parse a payload from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the payload to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Serialize the payload to a pretty-printed JSON string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    /// Get the underlying value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the payload and return the underlying value
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Whether the payload is one of the values a front-matter reader treats
    /// as "nothing configured": `null`, `false`, `""` or `0`
    ///
    /// An empty mapping is a real (default) configuration and is not unset.
    pub fn is_unset(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::String(s) => s.is_empty(),
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::Array(_) | Value::Object(_) => false,
        }
    }

    /// Get a single option by name
    ///
    /// Returns `None` when the option is missing or the payload is not a mapping.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(name))
    }

    /// Set a single option, replacing any previous value
    ///
    /// A payload that is not a mapping (`"default"`, `null`) is replaced by an
    /// empty mapping first.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.0 {
            map.insert(name.into(), value.into());
        }
    }

    /// Names of the options in this payload, in declaration order
    pub fn option_names(&self) -> Vec<&str> {
        self.0
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Value> for OutputOptions {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<OutputOptions> for Value {
    fn from(options: OutputOptions) -> Self {
        options.0
    }
}
