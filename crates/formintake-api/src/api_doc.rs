//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use formintake_core::models;
use formintake_core::validation;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Formintake API",
        version = "0.1.0",
        description = "Form submission intake: validates name, email, phone and password, stores an optional image, and persists each submission as one document."
    ),
    paths(
        handlers::submissions::create_submission,
        handlers::submissions::list_submissions,
        handlers::health::health_check,
    ),
    components(schemas(
        models::StoredSubmission,
        models::SubmissionCreatedResponse,
        validation::FieldError,
        validation::RuleKind,
        error::ErrorResponse,
        error::ValidationErrorResponse,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "submissions", description = "Form submission and listing"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_submission_routes() {
        let spec = ApiDoc::openapi();
        let data = spec.paths.paths.get("/data").expect("/data path");
        assert!(data.get.is_some());
        assert!(data.post.is_some());
        assert!(spec.paths.paths.contains_key("/health"));
    }
}
