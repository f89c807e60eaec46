use std::sync::Arc;

use axum::{extract::State, Json};
use formintake_core::models::{NewSubmission, StoredSubmission, SubmissionCreatedResponse};
use formintake_core::{validate_submission, AppError};

use crate::error::{ErrorResponse, HttpAppError, ValidationErrorResponse};
use crate::state::AppState;
use crate::utils::upload::{store_uploaded_file, SubmissionPayload};

/// Submit the form
///
/// Validates every field, stores the optional image, and writes one
/// submission document.
///
/// # Errors
/// - `AppError::Validation` - one or more field rules failed (nothing is stored)
/// - `AppError::BadRequest` - body could not be parsed
/// - `AppError::NotConnected` - the database was unreachable at startup
/// - `AppError::StoreUnavailable` - the insert failed
/// - `AppError::Storage` - the image could not be written
#[utoipa::path(
    post,
    path = "/data",
    tag = "submissions",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Form submitted successfully", body = SubmissionCreatedResponse),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 500, description = "Store unavailable or not connected", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, input), fields(operation = "create_submission"))]
pub async fn create_submission(
    State(state): State<Arc<AppState>>,
    SubmissionPayload(input): SubmissionPayload,
) -> Result<Json<SubmissionCreatedResponse>, HttpAppError> {
    let fields = validate_submission(&input).map_err(AppError::from)?;
    let store = state.submission_store()?;

    let stored_file = match input.image {
        Some(file) => Some(store_uploaded_file(state.storage.as_ref(), file).await?),
        None => None,
    };
    let image_path = stored_file.as_ref().map(|(_, url)| url.clone());

    let submission = NewSubmission::from_validated(fields, image_path);

    match store.insert(submission).await {
        Ok(id) => {
            tracing::info!(
                submission_id = %id,
                has_image = stored_file.is_some(),
                "Form submission stored"
            );
            Ok(Json(SubmissionCreatedResponse::new(id)))
        }
        Err(e) => {
            if let Some((storage_key, _)) = stored_file {
                let storage = state.storage.clone();
                tokio::spawn(async move {
                    if let Err(err) = storage.delete(&storage_key).await {
                        tracing::warn!(
                            error = %err,
                            key = %storage_key,
                            "Failed to remove uploaded file after failed insert"
                        );
                    }
                });
            }
            Err(e.into())
        }
    }
}

/// List all submissions
///
/// Returns every stored submission in insertion order.
#[utoipa::path(
    get,
    path = "/data",
    tag = "submissions",
    responses(
        (status = 200, description = "All stored submissions", body = Vec<StoredSubmission>),
        (status = 500, description = "Store unavailable or not connected", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_submissions"))]
pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredSubmission>>, HttpAppError> {
    let store = state.submission_store()?;
    let submissions = store.list_all().await?;

    tracing::debug!(count = submissions.len(), "Submissions listed");
    Ok(Json(submissions))
}
