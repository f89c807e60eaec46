//! Application state shared by every handler.

use formintake_core::{AppError, Config};
use formintake_db::SubmissionStore;
use formintake_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when the database could not be reached at startup.
    pub store: Option<Arc<dyn SubmissionStore>>,
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Option<Arc<dyn SubmissionStore>>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self {
            config,
            store,
            storage,
        }
    }

    /// The submission store, or `AppError::NotConnected` if startup left none.
    pub fn submission_store(&self) -> Result<Arc<dyn SubmissionStore>, AppError> {
        self.store.clone().ok_or(AppError::NotConnected)
    }

    pub fn is_store_connected(&self) -> bool {
        self.store.is_some()
    }
}
