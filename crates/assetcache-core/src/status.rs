//! Decoded status snapshot.
//!
//! `AssetCacheManagerUtil status --json` prints a document of the shape
//! `{"name": "status", "result": {...}}`. Only the `result` object is kept;
//! it is decoded fresh on every collection cycle and discarded after
//! extraction. Accessors are panic-free: an absent field surfaces as
//! `MissingField`, a present-but-wrong-typed one as `InvalidField`.

use chrono::DateTime;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ExporterError, Result};

/// Top-level tool document. Everything except `result` is ignored.
#[derive(Debug, Deserialize)]
struct StatusDocument {
    #[serde(default)]
    result: Option<Value>,
}

/// One decoded `result` object, immutable for the duration of a cycle.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    fields: Map<String, Value>,
}

impl StatusSnapshot {
    /// Decode captured tool output into a snapshot.
    pub fn from_tool_output(out: &str) -> Result<Self> {
        let doc: StatusDocument =
            serde_json::from_str(out).map_err(|e| ExporterError::Decode(e.to_string()))?;
        match doc.result {
            Some(Value::Object(fields)) => Ok(Self { fields }),
            _ => Err(ExporterError::Schema),
        }
    }

    fn get(&self, field: &'static str) -> Result<&Value> {
        self.fields
            .get(field)
            .ok_or(ExporterError::MissingField(field))
    }

    /// Required numeric field.
    pub fn bytes(&self, field: &'static str) -> Result<f64> {
        match self.get(field)? {
            Value::Number(n) => n.as_f64().ok_or(ExporterError::InvalidField {
                field,
                expected: "a finite number",
            }),
            _ => Err(ExporterError::InvalidField {
                field,
                expected: "a number",
            }),
        }
    }

    /// Optional numeric field, 0 when absent.
    pub fn bytes_or_zero(&self, field: &'static str) -> Result<f64> {
        match self.fields.get(field) {
            None => Ok(0.0),
            Some(Value::Number(n)) => n.as_f64().ok_or(ExporterError::InvalidField {
                field,
                expected: "a finite number",
            }),
            Some(_) => Err(ExporterError::InvalidField {
                field,
                expected: "a number",
            }),
        }
    }

    /// Required string field.
    pub fn str_field(&self, field: &'static str) -> Result<&str> {
        match self.get(field)? {
            Value::String(s) => Ok(s),
            _ => Err(ExporterError::InvalidField {
                field,
                expected: "a string",
            }),
        }
    }

    /// Required boolean field.
    pub fn bool_field(&self, field: &'static str) -> Result<bool> {
        match self.get(field)? {
            Value::Bool(b) => Ok(*b),
            _ => Err(ExporterError::InvalidField {
                field,
                expected: "a boolean",
            }),
        }
    }

    /// Required nested object, returned as its own snapshot view.
    pub fn nested(&self, field: &'static str) -> Result<StatusSnapshot> {
        match self.get(field)? {
            Value::Object(fields) => Ok(StatusSnapshot {
                fields: fields.clone(),
            }),
            _ => Err(ExporterError::InvalidField {
                field,
                expected: "an object",
            }),
        }
    }

    /// Required ISO-8601 timestamp field, as Unix epoch seconds.
    pub fn timestamp_seconds(&self, field: &'static str) -> Result<f64> {
        let raw = self.str_field(field)?;
        let ts = DateTime::parse_from_rfc3339(raw).map_err(|_| ExporterError::InvalidField {
            field,
            expected: "an ISO-8601 timestamp",
        })?;
        Ok(ts.timestamp() as f64)
    }
}
