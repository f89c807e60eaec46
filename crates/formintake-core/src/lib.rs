//! Formintake Core Library
//!
//! This crate provides the submission models, error types, configuration, and
//! field validation shared across all Formintake components.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, FormServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use validation::{validate_submission, FieldError, RuleKind, ValidationErrors};
