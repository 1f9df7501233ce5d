//! Core types for diffpost

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Form data keyed by field name
///
/// Ordered so that diffing and encoding iterate fields in a stable order.
pub type FormData = BTreeMap<String, FieldValue>;

/// Media type used when none is known for a file
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// A single form field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Plain text, sent verbatim
    Text(String),
    /// A file-like value, sent verbatim as a file part
    File(FileValue),
    /// Any other JSON-serializable value, sent as its JSON string
    Json(serde_json::Value),
}

impl FieldValue {
    /// Whether this value counts as "present" when used as a baseline
    ///
    /// Empty text, `null`, `false`, `0` and `""` are falsy. Files and
    /// composite JSON values are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::File(_) => true,
            Self::Json(value) => match value {
                serde_json::Value::Null => false,
                serde_json::Value::Bool(b) => *b,
                serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
                serde_json::Value::String(s) => !s.is_empty(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
            },
        }
    }

    /// Short kind label for logs and CLI output
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::File(_) => "file",
            Self::Json(_) => "json",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<FileValue> for FieldValue {
    fn from(value: FileValue) -> Self {
        Self::File(value)
    }
}

impl From<serde_json::Value> for FieldValue {
    /// JSON strings become [`FieldValue::Text`]; everything else stays JSON.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::Text(s),
            other => Self::Json(other),
        }
    }
}

/// A file-like field value
///
/// Equality between files only considers metadata, never `bytes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileValue {
    /// File name as presented to the endpoint
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Media type (e.g. `image/png`)
    pub media_type: String,
    /// Last modification time
    pub last_modified: DateTime<Utc>,
    /// File contents
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl FileValue {
    /// Build a file value from in-memory contents
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        last_modified: DateTime<Utc>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            media_type: media_type.into(),
            last_modified,
            bytes,
        }
    }

    /// Read a file from disk, taking name, size and mtime from the filesystem
    pub async fn from_path(path: &Path, media_type: Option<&str>) -> crate::error::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let metadata = tokio::fs::metadata(path).await?;
        let last_modified: DateTime<Utc> = metadata.modified()?.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name,
            size: metadata.len(),
            media_type: media_type.unwrap_or(DEFAULT_MEDIA_TYPE).to_string(),
            last_modified,
            bytes,
        })
    }
}

/// Convert a JSON object into form data
///
/// Used for baselines loaded from profiles and files. Non-object values
/// yield `None`.
pub fn form_data_from_json(value: serde_json::Value) -> Option<FormData> {
    match value {
        serde_json::Value::Object(map) => Some(
            map.into_iter()
                .map(|(k, v)| (k, FieldValue::from(v)))
                .collect(),
        ),
        _ => None,
    }
}

/// Convert form data back into a JSON baseline object
///
/// Text and JSON values carry over as-is. Files are skipped since a baseline
/// object cannot hold them.
pub fn form_data_to_json(data: &FormData) -> serde_json::Value {
    data.iter()
        .filter_map(|(key, value)| match value {
            FieldValue::Text(text) => Some((key.clone(), serde_json::Value::String(text.clone()))),
            FieldValue::Json(json) => Some((key.clone(), json.clone())),
            FieldValue::File(_) => None,
        })
        .collect::<serde_json::Map<_, _>>()
        .into()
}
