//! In-memory submission store for testing

use crate::db::SubmissionStore;
use async_trait::async_trait;
use chrono::Utc;
use formintake_core::models::{NewSubmission, StoredSubmission};
use formintake_core::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Submission store that keeps documents in a `Vec`, in insertion order.
///
/// Clones share the same documents, so a test can keep a handle after
/// handing one to the application.
#[derive(Clone, Default)]
pub struct InMemorySubmissionStore {
    submissions: Arc<Mutex<Vec<StoredSubmission>>>,
    failing: Arc<AtomicBool>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as if the database became unreachable.
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of the stored documents (for test assertions)
    pub fn submissions(&self) -> Vec<StoredSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable(
                "connection to the submission store was lost".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<Uuid, AppError> {
        self.check_available()?;
        let id = Uuid::new_v4();
        let stored = StoredSubmission::from_new(id, Utc::now(), submission);
        self.submissions.lock().unwrap().push(stored);
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<StoredSubmission>, AppError> {
        self.check_available()?;
        Ok(self.submissions())
    }
}
