//! Front matter record and its output format accessors
//!
//! A [`FrontMatter`] is produced by whatever parses the YAML block of an
//! R Markdown document (the IDE session converts it to JSON). This module only
//! reads and edits the `output` field; every other field is carried through
//! untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{FrontMatterError, Result};
use crate::options::OutputOptions;

/// Separator line that opens and closes a YAML front matter block
pub const FRONTMATTER_SEPARATOR: &str = "---\n";

/// The `output` field: output format name -> options, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "OutputField")]
pub struct OutputFormats(IndexMap<String, OutputOptions>);

/// Spellings of the `output` field accepted by R Markdown
#[derive(Deserialize)]
#[serde(
    untagged,
    expecting = "a mapping of output formats, a format name or a list of format names"
)]
enum OutputField {
    /// `output: {html_document: {toc: true}}`
    Formats(IndexMap<String, OutputOptions>),
    /// `output: html_document`
    Single(String),
    /// `output: [html_document, pdf_document]`
    List(Vec<String>),
}

impl From<OutputField> for OutputFormats {
    fn from(field: OutputField) -> Self {
        match field {
            OutputField::Formats(formats) => Self(formats),
            OutputField::Single(name) => Self::from_names([name]),
            OutputField::List(names) => Self::from_names(names),
        }
    }
}

impl Serialize for OutputFormats {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl OutputFormats {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Formats configured with default (empty) options
    fn from_names(names: impl IntoIterator<Item = String>) -> Self {
        Self(
            names
                .into_iter()
                .map(|name| (name, OutputOptions::new()))
                .collect(),
        )
    }

    /// Number of configured formats
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no format is configured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Format names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Raw entry for a format, including unset payloads
    pub fn get(&self, format: &str) -> Option<&OutputOptions> {
        self.0.get(format)
    }

    /// Insert or replace the payload for a format, returning the previous one
    ///
    /// A replaced format keeps its original position.
    pub fn insert(&mut self, format: String, options: OutputOptions) -> Option<OutputOptions> {
        self.0.insert(format, options)
    }

    /// Iterate over `(format, options)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OutputOptions)> {
        self.0.iter().map(|(name, options)| (name.as_str(), options))
    }
}

/// A document's front matter
///
/// Only `output` is typed; the remaining top-level fields (`title`, `author`,
/// `params`, ...) are kept as-is so a record survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output: Option<OutputFormats>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl FrontMatter {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from its JSON form
    ///
    /// `null` (what an empty YAML block converts to) yields an empty record.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => {
                if let Some(output) = map.get("output") {
                    check_output_field(output)?;
                }
                Ok(serde_json::from_value(Value::Object(map))?)
            }
            other => Err(FrontMatterError::NotAMapping {
                found: json_type_name(&other),
            }),
        }
    }

    /// Deserialize a record from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Convert the record to a JSON value
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize the record to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the record to a pretty-printed JSON string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The `output` field, if the document has one
    pub fn output(&self) -> Option<&OutputFormats> {
        self.output.as_ref()
    }

    /// Top-level fields other than `output`
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Names of the configured output formats
    ///
    /// Empty when the document has no `output` field. The order follows the
    /// document and is only meaningful for display.
    pub fn list_formats(&self) -> Vec<&str> {
        self.output
            .as_ref()
            .map(|output| output.names().collect())
            .unwrap_or_default()
    }

    /// Get the options configured for `format`
    ///
    /// Returns `None` when the format is not configured or its payload is
    /// unset (see [`OutputOptions::is_unset`]).
    pub fn get_output_option(&self, format: &str) -> Option<&OutputOptions> {
        self.output
            .as_ref()
            .and_then(|output| output.get(format))
            .filter(|options| !options.is_unset())
    }

    /// Set the options for `format`, replacing whatever was there
    ///
    /// Creates the `output` field when the document has none.
    pub fn set_output_option(&mut self, format: impl Into<String>, options: OutputOptions) {
        let format = format.into();
        let output = self.output.get_or_insert_with(|| {
            debug!("creating output field for format {format}");
            OutputFormats::new()
        });
        if output.insert(format.clone(), options).is_some() {
            debug!("replaced options for format {format}");
        }
    }
}

/// Reject `output` values that none of the accepted spellings can hold
fn check_output_field(output: &Value) -> Result<()> {
    let found = match output {
        Value::Null | Value::Object(_) | Value::String(_) => return Ok(()),
        Value::Array(items) if items.iter().all(Value::is_string) => return Ok(()),
        Value::Array(_) => "a list with non-string entries",
        other => json_type_name(other),
    };
    Err(FrontMatterError::InvalidOutput { found })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
