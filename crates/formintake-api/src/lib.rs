//! Formintake API Library
//!
//! This crate provides the HTTP handlers, request extraction, and application
//! setup for the form submission service.

// Module declarations
mod api_doc;
mod handlers;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError, ValidationErrorResponse};
pub use state::AppState;
