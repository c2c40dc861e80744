//! Collects a multipart form into text fields and uploaded files.

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use common_services::api::gallery::error::GalleryError;
use common_services::api::product::error::ProductError;
use common_services::storage::Upload;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Invalid form data: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Invalid value for '{field}': {value}")]
    InvalidField { field: String, value: String },
}

impl From<FormError> for GalleryError {
    fn from(err: FormError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<FormError> for ProductError {
    fn from(err: FormError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, Upload>,
}

impl FormData {
    /// Reads every part of the form. A file input left empty by the browser is skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, FormError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(ToOwned::to_owned) else {
                continue;
            };
            if let Some(file_name) = field.file_name().map(ToOwned::to_owned) {
                let bytes = field.bytes().await?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.files.insert(
                    name,
                    Upload {
                        file_name,
                        bytes: bytes.to_vec(),
                    },
                );
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    /// Text value of a field, `None` when absent.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    pub fn take_file(&mut self, name: &str) -> Option<Upload> {
        self.files.remove(name)
    }

    /// Parses a field. Absent or blank fields are `None`.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, FormError> {
        let Some(raw) = self.fields.get(name).map(|v| v.trim()) else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(|_| FormError::InvalidField {
            field: name.to_owned(),
            value: raw.to_owned(),
        })
    }

    /// Checkbox style boolean. An absent field is `false`.
    pub fn flag(&self, name: &str) -> Result<bool, FormError> {
        let Some(raw) = self.fields.get(name) else {
            return Ok(false);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "1" | "yes" => Ok(true),
            "false" | "off" | "0" | "no" | "" => Ok(false),
            other => Err(FormError::InvalidField {
                field: name.to_owned(),
                value: other.to_owned(),
            }),
        }
    }

    #[cfg(test)]
    fn with_fields(fields: &[(&str, &str)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            files: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_types::MediaKind;

    #[test]
    fn parses_optional_numbers() {
        let form = FormData::with_fields(&[("categoryId", " 4 "), ("displayOrder", ""), ("bad", "x")]);
        assert_eq!(form.parse::<i32>("categoryId").expect("parsed"), Some(4));
        assert_eq!(form.parse::<i32>("displayOrder").expect("parsed"), None);
        assert_eq!(form.parse::<i32>("missing").expect("parsed"), None);
        assert!(matches!(
            form.parse::<i32>("bad"),
            Err(FormError::InvalidField { .. })
        ));
    }

    #[test]
    fn parses_checkbox_flags() {
        let form = FormData::with_fields(&[("a", "on"), ("b", "False"), ("c", "maybe")]);
        assert!(form.flag("a").expect("flag"));
        assert!(!form.flag("b").expect("flag"));
        assert!(!form.flag("absent").expect("flag"));
        assert!(form.flag("c").is_err());
    }

    #[test]
    fn parses_media_kind() {
        let form = FormData::with_fields(&[("kind", "Video")]);
        assert_eq!(form.parse::<MediaKind>("kind").expect("parsed"), Some(MediaKind::Video));
    }

    #[test]
    fn form_errors_become_validation_errors() {
        let err = FormError::InvalidField {
            field: "categoryId".to_owned(),
            value: "abc".to_owned(),
        };
        assert!(matches!(GalleryError::from(err), GalleryError::Validation(msg) if msg.contains("categoryId")));
    }
}
