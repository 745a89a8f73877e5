//! Output modes and structured serialization.
//!
//! [`OutputMode`] picks between rendered text (styled or plain) and the
//! structured formats, which serialize command data directly and skip the
//! templates.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Controls how command output is rendered.
///
/// This is the user-facing enum for the `--output` CLI flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Auto-detect: TTY gets Term, pipe gets Text
    #[default]
    Auto,
    /// Always use terminal styling
    Term,
    /// Never use styling (plain text)
    Text,
    /// Serialize data as JSON
    Json,
    /// Serialize data as YAML
    Yaml,
    /// Serialize flattened data as CSV
    Csv,
}

impl OutputMode {
    /// Returns true for JSON, YAML and CSV.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml | OutputMode::Csv)
    }

    /// Resolves Auto to Term or Text depending on whether stdout is a
    /// terminal. Other modes are returned unchanged.
    pub fn resolve_auto(&self) -> OutputMode {
        match self {
            OutputMode::Auto => {
                if console::Term::stdout().is_term() {
                    OutputMode::Term
                } else {
                    OutputMode::Text
                }
            }
            other => *other,
        }
    }

    /// Whether rendered text should carry ANSI styling.
    pub fn is_styled(&self) -> bool {
        self.resolve_auto() == OutputMode::Term
    }
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <OutputMode as ValueEnum>::from_str(s, true)
    }
}

/// Errors that can occur while producing output.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(String),

    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Not a structured output mode")]
    NotStructured,
}

/// Serializes data to the given structured format.
pub fn serialize_structured<T: Serialize>(
    data: &T,
    mode: OutputMode,
) -> Result<String, SerializeError> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputMode::Csv => serialize_csv(data),
        _ => Err(SerializeError::NotStructured),
    }
}

/// Serializes data to CSV by way of its JSON form.
pub fn serialize_csv<T: Serialize>(data: &T) -> Result<String, SerializeError> {
    let json_value = serde_json::to_value(data)?;
    flatten_json_to_csv(&json_value)
}

fn csv_error(e: impl std::fmt::Display) -> SerializeError {
    SerializeError::Csv(e.to_string())
}

/// Arrays of objects become one row per object with the first object's
/// keys as headers; a single object becomes key,value rows.
fn flatten_json_to_csv(value: &serde_json::Value) -> Result<String, SerializeError> {
    use serde_json::Value;

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    match value {
        Value::Array(arr) if !arr.is_empty() => {
            if let Some(Value::Object(first)) = arr.first() {
                let headers: Vec<&str> = first.keys().map(|s| s.as_str()).collect();
                wtr.write_record(&headers).map_err(csv_error)?;
                for item in arr {
                    if let Value::Object(obj) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| obj.get(*h).map(value_to_string).unwrap_or_default())
                            .collect();
                        wtr.write_record(&row).map_err(csv_error)?;
                    }
                }
            } else {
                wtr.write_record(["value"]).map_err(csv_error)?;
                for item in arr {
                    wtr.write_record([value_to_string(item)]).map_err(csv_error)?;
                }
            }
        }
        Value::Array(_) => {}
        Value::Object(obj) => {
            wtr.write_record(["key", "value"]).map_err(csv_error)?;
            for (k, v) in obj {
                wtr.write_record([k.as_str(), &value_to_string(v)])
                    .map_err(csv_error)?;
            }
        }
        _ => {
            wtr.write_record(["value"]).map_err(csv_error)?;
            wtr.write_record([value_to_string(value)]).map_err(csv_error)?;
        }
    }

    let bytes = wtr.into_inner().map_err(csv_error)?;
    String::from_utf8(bytes).map_err(csv_error)
}

/// Lists are joined with `;` so tags fit one cell.
fn value_to_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Array(items) if items.iter().all(|i| !i.is_object()) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(";"),
        other => other.to_string(),
    }
}
