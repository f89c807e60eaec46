//! Formintake DB Library
//!
//! Persistence gateway for form submissions: the `SubmissionStore` trait and
//! its PostgreSQL implementation.

pub mod db;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use db::{PgSubmissionStore, SubmissionRow, SubmissionStore};
