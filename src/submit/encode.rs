//! Multipart encoding for endpoint destinations

use crate::error::Result;
use crate::types::{FieldValue, FileValue, FormData};
use reqwest::multipart::{Form, Part};

/// One named part of an encoded submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedPart {
    /// Text part (plain text or a JSON-serialized value)
    Text {
        /// Field name
        name: String,
        /// Part body
        value: String,
    },
    /// File part, sent with its file name and media type
    File {
        /// Field name
        name: String,
        /// The file
        file: FileValue,
    },
}

impl EncodedPart {
    /// Field name of this part
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }

    fn into_multipart_part(self) -> Result<(String, Part)> {
        match self {
            Self::Text { name, value } => Ok((name, Part::text(value))),
            Self::File { name, file } => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.name)
                    .mime_str(&file.media_type)?;
                Ok((name, part))
            }
        }
    }
}

/// Encode diffed form data into transmittable parts
///
/// Text and files go through verbatim; every other value is serialized to
/// its JSON string. Parts follow key order.
pub fn encode_parts(data: &FormData) -> Result<Vec<EncodedPart>> {
    data.iter()
        .map(|(name, value)| {
            let part = match value {
                FieldValue::Text(text) => EncodedPart::Text {
                    name: name.clone(),
                    value: text.clone(),
                },
                FieldValue::File(file) => EncodedPart::File {
                    name: name.clone(),
                    file: file.clone(),
                },
                FieldValue::Json(json) => EncodedPart::Text {
                    name: name.clone(),
                    value: serde_json::to_string(json)?,
                },
            };
            Ok(part)
        })
        .collect()
}

/// Assemble encoded parts into a multipart form body
pub fn into_multipart(parts: Vec<EncodedPart>) -> Result<Form> {
    parts.into_iter().try_fold(Form::new(), |form, part| {
        let (name, part) = part.into_multipart_part()?;
        Ok(form.part(name, part))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_text_is_verbatim_and_json_is_serialized() {
        let mut data = FormData::new();
        data.insert("name".to_string(), "Nir".into());
        data.insert("age".to_string(), json!(31).into());
        data.insert("tags".to_string(), json!(["a", "b"]).into());
        data.insert("meta".to_string(), FieldValue::Json(json!("quoted")));

        let parts = encode_parts(&data).unwrap();

        assert_eq!(
            parts,
            vec![
                EncodedPart::Text {
                    name: "age".to_string(),
                    value: "31".to_string()
                },
                EncodedPart::Text {
                    name: "meta".to_string(),
                    value: "\"quoted\"".to_string()
                },
                EncodedPart::Text {
                    name: "name".to_string(),
                    value: "Nir".to_string()
                },
                EncodedPart::Text {
                    name: "tags".to_string(),
                    value: "[\"a\",\"b\"]".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_file_passes_through() {
        let file = FileValue::new("cv.pdf", "application/pdf", Utc::now(), vec![1, 2, 3]);
        let mut data = FormData::new();
        data.insert("cv".to_string(), file.clone().into());

        let parts = encode_parts(&data).unwrap();

        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name(), "cv");
        assert_eq!(
            parts[0],
            EncodedPart::File {
                name: "cv".to_string(),
                file
            }
        );
        assert!(into_multipart(parts).is_ok());
    }

    #[test]
    fn test_invalid_media_type_is_an_error() {
        let file = FileValue::new("x", "not a mime", Utc::now(), vec![]);
        let parts = vec![EncodedPart::File {
            name: "x".to_string(),
            file,
        }];
        assert!(into_multipart(parts).is_err());
    }
}
