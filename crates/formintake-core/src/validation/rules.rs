//! Declarative field rules
//!
//! A field rule is a predicate over one input value plus the error it produces.
//! Rules are grouped per field in [`FieldRules`]; every rule of a group runs,
//! except that only `required` runs against an empty value.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Name of the rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Required,
    Format,
    Length,
    Numeric,
    Complexity,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Format => "format",
            RuleKind::Length => "length",
            RuleKind::Numeric => "numeric",
            RuleKind::Complexity => "complexity",
        }
    }
}

impl Display for RuleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// One violated rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Wire name of the input field (e.g. `fullName`)
    pub field: String,
    pub rule: RuleKind,
    pub message: String,
}

/// A single predicate: `check` returns true when the value passes.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub rule: RuleKind,
    pub message: &'static str,
    check: fn(&str) -> bool,
}

impl FieldRule {
    pub const fn new(rule: RuleKind, message: &'static str, check: fn(&str) -> bool) -> Self {
        Self {
            rule,
            message,
            check,
        }
    }

    pub fn passes(&self, value: &str) -> bool {
        (self.check)(value)
    }
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FieldRule")
            .field("rule", &self.rule)
            .field("message", &self.message)
            .finish()
    }
}

/// The ordered rule list for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [FieldRule],
}

impl FieldRules {
    /// Append one error per failed rule, in rule order.
    pub fn collect_errors(&self, value: &str, errors: &mut Vec<FieldError>) {
        for rule in self.rules {
            // Only presence is meaningful for an empty value.
            if value.is_empty() && rule.rule != RuleKind::Required {
                continue;
            }
            if !rule.passes(value) {
                errors.push(FieldError {
                    field: self.field.to_string(),
                    rule: rule.rule,
                    message: rule.message.to_string(),
                });
            }
        }
    }
}

/// Ordered list of field errors from one validation run. Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `field` failed `rule`.
    pub fn has(&self, field: &str, rule: RuleKind) -> bool {
        self.0.iter().any(|e| e.field == field && e.rule == rule)
    }

    /// Rules failed by `field`, in order.
    pub fn rules_for(&self, field: &str) -> Vec<RuleKind> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.rule)
            .collect()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
