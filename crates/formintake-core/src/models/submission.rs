//! Form submission models: raw input, validated fields, and the persisted document.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use utoipa::ToSchema;
use uuid::Uuid;

/// Message returned with the generated id after a successful submission.
pub const SUBMISSION_SUCCESS_MESSAGE: &str = "Form submitted successfully";

/// A file part received alongside the form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub original_filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Lowercased extension of the original filename, without the leading dot.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .map(|e| e.to_lowercase())
    }
}

/// Raw form fields as received. Missing fields are empty strings.
///
/// Scalar JSON values are taken in their text form, so `1234567890` and
/// `"1234567890"` are the same phone number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionInput {
    #[serde(deserialize_with = "scalar_as_string")]
    pub full_name: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub email: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub phone_number: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub password: String,
    #[serde(skip)]
    pub image: Option<UploadedFile>,
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number, or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        // null reads as a missing field
        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}

/// The four text fields after every rule passed. Values are unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// A submission ready to be written; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Stored as received.
    pub password: String,
    /// Relative reference to the uploaded file; `None` when no file was sent.
    pub image_path: Option<String>,
}

impl NewSubmission {
    pub fn from_validated(fields: ValidatedFields, image_path: Option<String>) -> Self {
        Self {
            full_name: fields.full_name,
            email: fields.email,
            phone: fields.phone_number,
            password: fields.password,
            image_path,
        }
    }
}

/// A persisted submission document as returned by `GET /data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredSubmission {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StoredSubmission {
    /// Build the stored document for a new submission.
    pub fn from_new(id: Uuid, created_at: DateTime<Utc>, submission: NewSubmission) -> Self {
        Self {
            id,
            full_name: submission.full_name,
            email: submission.email,
            phone: submission.phone,
            password: submission.password,
            image_path: submission.image_path,
            created_at,
        }
    }
}

/// Response body for `POST /data` on success.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionCreatedResponse {
    pub message: String,
    /// Id assigned by the store
    pub data: Uuid,
}

impl SubmissionCreatedResponse {
    pub fn new(id: Uuid) -> Self {
        Self {
            message: SUBMISSION_SUCCESS_MESSAGE.to_string(),
            data: id,
        }
    }
}
