//! Submission body extraction and file intake

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use formintake_core::models::{SubmissionInput, UploadedFile};
use formintake_core::AppError;
use formintake_storage::{generate_upload_filename, Storage};

use crate::error::HttpAppError;

/// Multipart part carrying the optional attachment.
pub const IMAGE_FIELD: &str = "image";

/// Form fields plus the optional image, from whichever body encoding the
/// client used.
///
/// Multipart bodies may carry the `image` file part. JSON and urlencoded
/// bodies carry text fields only. Any other (or missing) content type is
/// treated as an empty form so that every field reports `required`.
#[derive(Debug)]
pub struct SubmissionPayload(pub SubmissionInput);

impl<S> FromRequest<S> for SubmissionPayload
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        let input = if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                AppError::BadRequest(format!("Invalid multipart body: {}", e.body_text()))
            })?;
            read_multipart_submission(multipart).await?
        } else if content_type.starts_with("application/json") {
            let Json(input) = Json::<SubmissionInput>::from_request(req, state)
                .await
                .map_err(|e| {
                    AppError::BadRequest(format!("Invalid request body: {}", e.body_text()))
                })?;
            input
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(input) = Form::<SubmissionInput>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid form body: {}", e.body_text())))?;
            input
        } else {
            tracing::debug!(content_type = %content_type, "Unrecognized submission body; treating as empty form");
            SubmissionInput::default()
        };

        Ok(SubmissionPayload(input))
    }
}

/// Read text fields and at most one `image` file part from a multipart form.
/// Unknown parts are ignored.
pub async fn read_multipart_submission(
    mut multipart: Multipart,
) -> Result<SubmissionInput, AppError> {
    let mut input = SubmissionInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == IMAGE_FIELD {
            let original_filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {}", e)))?;

            // Browsers send an empty, unnamed part when no file was chosen.
            if original_filename.is_empty() && data.is_empty() {
                continue;
            }
            if input.image.is_some() {
                return Err(AppError::BadRequest(
                    "Multiple image fields are not allowed; send at most one field named 'image'"
                        .to_string(),
                ));
            }

            input.image = Some(UploadedFile {
                original_filename,
                content_type,
                data: data.to_vec(),
            });
            continue;
        }

        let slot = match field_name.as_str() {
            "fullName" => &mut input.full_name,
            "email" => &mut input.email,
            "phoneNumber" => &mut input.phone_number,
            "password" => &mut input.password,
            _ => continue,
        };
        *slot = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read field {}: {}", field_name, e)))?;
    }

    Ok(input)
}

/// Write an uploaded file under a freshly generated name.
///
/// Returns (storage_key, public_url); the URL becomes the submission's `imagePath`.
pub async fn store_uploaded_file(
    storage: &dyn Storage,
    file: UploadedFile,
) -> Result<(String, String), HttpAppError> {
    let extension = file.extension();
    let storage_key = generate_upload_filename(extension.as_deref());
    let size_bytes = file.data.len();

    let stored = storage
        .upload(&storage_key, &file.content_type, file.data)
        .await?;

    tracing::debug!(
        key = %stored.0,
        original_filename = %file.original_filename,
        size_bytes,
        "Uploaded image stored"
    );

    Ok(stored)
}
