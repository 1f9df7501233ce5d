//! Field arguments shared by `submit` and `diff`

use clap::Args;
use diffpost::config::load_baseline;
use diffpost::error::{Error, Result};
use diffpost::types::{FieldValue, FileValue, FormData};
use std::path::{Path, PathBuf};

/// Form fields and the baseline they are compared against
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Text field as NAME=VALUE (repeatable)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,

    /// JSON field as NAME=JSON (repeatable)
    #[arg(short, long = "json")]
    pub json: Vec<String>,

    /// File field as NAME=PATH[;type=MEDIA/TYPE] (repeatable)
    #[arg(long = "file")]
    pub files: Vec<String>,

    /// Baseline JSON object file (overrides the profile baseline)
    #[arg(short, long)]
    pub baseline: Option<PathBuf>,
}

impl FieldArgs {
    /// Collect all fields into form data; later duplicates win
    pub async fn form_data(&self) -> Result<FormData> {
        let mut data = FormData::new();

        for arg in &self.fields {
            let (name, value) = split_assignment(arg)?;
            data.insert(name.to_string(), FieldValue::Text(value.to_string()));
        }

        for arg in &self.json {
            let (name, value) = split_assignment(arg)?;
            let json: serde_json::Value = serde_json::from_str(value)
                .map_err(|e| Error::Parse(format!("invalid JSON for field '{name}': {e}")))?;
            data.insert(name.to_string(), FieldValue::Json(json));
        }

        for arg in &self.files {
            let (name, value) = split_assignment(arg)?;
            let (path, media_type) = split_media_type(value);
            let file = FileValue::from_path(Path::new(path), media_type).await?;
            data.insert(name.to_string(), FieldValue::File(file));
        }

        Ok(data)
    }

    /// Baseline loaded from `--baseline`, if given
    pub fn baseline(&self) -> Result<Option<FormData>> {
        self.baseline.as_deref().map(load_baseline).transpose()
    }
}

/// Split `NAME=VALUE` at the first `=`
pub fn split_assignment(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(Error::Parse(format!("expected NAME=VALUE, got '{arg}'"))),
    }
}

/// Split `PATH;type=MEDIA/TYPE` into path and optional media type
fn split_media_type(value: &str) -> (&str, Option<&str>) {
    match value.rsplit_once(";type=") {
        Some((path, media_type)) if !media_type.is_empty() => (path, Some(media_type)),
        _ => (value, None),
    }
}

/// Split `NAME:VALUE` header syntax
pub fn split_header(arg: &str) -> Result<(String, String)> {
    match arg.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(Error::Parse(format!("expected NAME:VALUE header, got '{arg}'"))),
    }
}
