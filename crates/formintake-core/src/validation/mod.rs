//! Validation modules

pub mod rules;
pub mod submission;

pub use rules::{FieldError, FieldRule, FieldRules, RuleKind, ValidationErrors};
pub use submission::{validate_submission, SUBMISSION_RULES};
