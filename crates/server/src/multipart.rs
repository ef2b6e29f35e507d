//! Admin forms arrive as `multipart/form-data`: text fields plus an optional
//! `image` file part. Text fields are collected into a JSON object and
//! deserialized into the model input types.

use axum::extract::Multipart;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use service::media::ImageUpload;

use crate::errors::JsonApiError;

pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Default)]
pub struct ResourceForm {
    pub fields: Map<String, Value>,
    pub image: Option<ImageUpload>,
}

impl ResourceForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, JsonApiError> {
        let mut form = ResourceForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| JsonApiError::bad_request(format!("malformed multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else { continue };
            if name == IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| JsonApiError::bad_request(format!("cannot read image: {e}")))?;
                // Browsers send an empty part when no file was chosen.
                if !file_name.is_empty() && !bytes.is_empty() {
                    form.image = Some(ImageUpload { file_name, content_type, bytes: bytes.to_vec() });
                }
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| JsonApiError::bad_request(format!("cannot read field {name}: {e}")))?;
                form.fields.insert(name, Value::String(text));
            }
        }
        Ok(form)
    }

    /// Deserialize the text fields. Empty values are dropped unless the key is
    /// listed in `clearable`, where an empty string means "clear".
    pub fn input<T: DeserializeOwned>(&self, clearable: &[&str]) -> Result<T, JsonApiError> {
        let fields: Map<String, Value> = self
            .fields
            .iter()
            .filter(|(k, v)| clearable.contains(&k.as_str()) || v.as_str().map_or(true, |s| !s.trim().is_empty()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        serde_json::from_value(Value::Object(fields)).map_err(|e| JsonApiError::bad_request(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::activity::{ActivityPatch, NewActivity};
    use models::display::ActivityDisplay;

    fn form(pairs: &[(&str, &str)]) -> ResourceForm {
        let mut f = ResourceForm::default();
        for (k, v) in pairs {
            f.fields.insert(k.to_string(), Value::String(v.to_string()));
        }
        f
    }

    #[test]
    fn text_fields_deserialize_into_inputs() {
        let f = form(&[("title", "Book Club"), ("description", "Weekly meetup"), ("display_on", "both")]);
        let input: NewActivity = f.input(&[]).unwrap();
        assert_eq!(input.display_on, ActivityDisplay::Both);
        assert_eq!(input.image_path, None);
    }

    #[test]
    fn empty_values_are_dropped_from_patches() {
        let f = form(&[("title", "New"), ("display_on", ""), ("description", " ")]);
        let patch: ActivityPatch = f.input(&[]).unwrap();
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert_eq!(patch.display_on, None);
        assert_eq!(patch.description, None);
    }

    #[test]
    fn unknown_enum_values_are_bad_requests() {
        let f = form(&[("title", "x"), ("description", "y"), ("display_on", "sidebar")]);
        let err = f.input::<NewActivity>(&[]).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }
}
