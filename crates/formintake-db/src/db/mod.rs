//! Database repositories for the data access layer
//!
//! A single logical collection, `submissions`, holds one flat row per
//! validated form submission.

pub mod submission;

pub use submission::{PgSubmissionStore, SubmissionRow, SubmissionStore};
