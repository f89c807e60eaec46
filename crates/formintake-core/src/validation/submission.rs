//! Submission form validation
//!
//! Rules per field, in the order they are reported:
//! - `fullName`: required, format (two alphabetic words separated by one whitespace)
//! - `email`: required, format (valid address with a dotted domain)
//! - `phoneNumber`: required, length (exactly 10 chars), numeric (digits only)
//! - `password`: required, length (at least 8 chars), complexity (upper, lower, digit; alphanumeric only)

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

use super::rules::{FieldError, FieldRule, FieldRules, RuleKind, ValidationErrors};
use crate::models::{SubmissionInput, ValidatedFields};

pub const PHONE_NUMBER_LENGTH: usize = 10;
pub const MIN_PASSWORD_LENGTH: usize = 8;

static FULL_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]+\s[A-Za-z]+$").expect("full name pattern is a valid regex")
});

static PASSWORD_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]+$").expect("password charset pattern is a valid regex")
});

fn is_present(value: &str) -> bool {
    !value.is_empty()
}

fn is_full_name(value: &str) -> bool {
    FULL_NAME_PATTERN.is_match(value)
}

fn is_email(value: &str) -> bool {
    value.validate_email()
        && value
            .rsplit_once('@')
            .and_then(|(_, domain)| domain.rsplit_once('.'))
            .is_some_and(|(host, tld)| !host.is_empty() && is_top_level_domain(tld))
}

/// Alphabetic label of at least two characters, or an IDNA `xn--` label.
fn is_top_level_domain(label: &str) -> bool {
    label.chars().count() >= 2
        && (label.chars().all(char::is_alphabetic)
            || label
                .get(..4)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("xn--")))
}

fn has_phone_length(value: &str) -> bool {
    value.chars().count() == PHONE_NUMBER_LENGTH
}

fn is_numeric(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

fn has_password_length(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LENGTH
}

fn is_complex_password(value: &str) -> bool {
    PASSWORD_CHARSET.is_match(value)
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_digit())
}

pub const FULL_NAME_RULES: FieldRules = FieldRules {
    field: "fullName",
    rules: &[
        FieldRule::new(RuleKind::Required, "Full name is required", is_present),
        FieldRule::new(
            RuleKind::Format,
            "Full name must contain first and last name",
            is_full_name,
        ),
    ],
};

pub const EMAIL_RULES: FieldRules = FieldRules {
    field: "email",
    rules: &[
        FieldRule::new(RuleKind::Required, "Email is required", is_present),
        FieldRule::new(RuleKind::Format, "Invalid email format", is_email),
    ],
};

pub const PHONE_NUMBER_RULES: FieldRules = FieldRules {
    field: "phoneNumber",
    rules: &[
        FieldRule::new(RuleKind::Required, "Phone number is required", is_present),
        FieldRule::new(
            RuleKind::Length,
            "Phone number must be 10 digits",
            has_phone_length,
        ),
        FieldRule::new(
            RuleKind::Numeric,
            "Phone number must contain only numbers",
            is_numeric,
        ),
    ],
};

pub const PASSWORD_RULES: FieldRules = FieldRules {
    field: "password",
    rules: &[
        FieldRule::new(RuleKind::Required, "Password is required", is_present),
        FieldRule::new(
            RuleKind::Length,
            "Password must be at least 8 characters",
            has_password_length,
        ),
        FieldRule::new(
            RuleKind::Complexity,
            "Password must contain at least one uppercase letter, one lowercase letter, and one number",
            is_complex_password,
        ),
    ],
};

/// Every field's rules, in reporting order.
pub const SUBMISSION_RULES: [FieldRules; 4] = [
    FULL_NAME_RULES,
    EMAIL_RULES,
    PHONE_NUMBER_RULES,
    PASSWORD_RULES,
];

/// Validate the text fields of a submission.
///
/// Runs every rule of every field and returns all violations together. On
/// success the fields are returned unchanged. The attached file, if any, is
/// not inspected.
pub fn validate_submission(input: &SubmissionInput) -> Result<ValidatedFields, ValidationErrors> {
    let values = [
        input.full_name.as_str(),
        input.email.as_str(),
        input.phone_number.as_str(),
        input.password.as_str(),
    ];

    let mut errors: Vec<FieldError> = Vec::new();
    for (rules, value) in SUBMISSION_RULES.iter().zip(values) {
        rules.collect_errors(value, &mut errors);
    }

    if !errors.is_empty() {
        return Err(ValidationErrors::new(errors));
    }

    Ok(ValidatedFields {
        full_name: input.full_name.clone(),
        email: input.email.clone(),
        phone_number: input.phone_number.clone(),
        password: input.password.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(full_name: &str, email: &str, phone: &str, password: &str) -> SubmissionInput {
        SubmissionInput {
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone_number: phone.to_string(),
            password: password.to_string(),
            image: None,
        }
    }

    fn valid() -> SubmissionInput {
        input("Jane Doe", "jane@x.com", "1234567890", "Abcdef12")
    }

    #[test]
    fn test_valid_submission_returns_fields_unchanged() {
        let fields = validate_submission(&valid()).expect("valid input");
        assert_eq!(fields.full_name, "Jane Doe");
        assert_eq!(fields.email, "jane@x.com");
        assert_eq!(fields.phone_number, "1234567890");
        assert_eq!(fields.password, "Abcdef12");
    }

    #[test]
    fn test_invalid_submission_reports_every_field() {
        let errors = validate_submission(&input("Jane", "bad", "123", "abc")).unwrap_err();

        assert!(errors.has("fullName", RuleKind::Format));
        assert!(errors.has("email", RuleKind::Format));
        assert!(errors.has("phoneNumber", RuleKind::Length));
        assert!(errors.has("password", RuleKind::Length));
        assert!(errors.has("password", RuleKind::Complexity));
        // "123" is all digits
        assert!(!errors.has("phoneNumber", RuleKind::Numeric));
    }

    #[test]
    fn test_errors_follow_field_then_rule_order() {
        let errors = validate_submission(&input("Jane", "bad", "12a", "abc")).unwrap_err();
        let pairs: Vec<(&str, RuleKind)> = errors
            .errors()
            .iter()
            .map(|e| (e.field.as_str(), e.rule))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("fullName", RuleKind::Format),
                ("email", RuleKind::Format),
                ("phoneNumber", RuleKind::Length),
                ("phoneNumber", RuleKind::Numeric),
                ("password", RuleKind::Length),
                ("password", RuleKind::Complexity),
            ]
        );
    }

    #[test]
    fn test_empty_fields_only_report_required() {
        let errors = validate_submission(&SubmissionInput::default()).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.errors().iter().all(|e| e.rule == RuleKind::Required));
        assert_eq!(errors.errors()[0].message, "Full name is required");
        assert_eq!(errors.errors()[3].message, "Password is required");
    }

    #[test]
    fn test_full_name_accepts_two_alphabetic_words() {
        for name in ["Jane Doe", "a b", "ABC xyz", "Jane\tDoe"] {
            let mut candidate = valid();
            candidate.full_name = name.to_string();
            assert!(
                validate_submission(&candidate).is_ok(),
                "expected '{}' to pass",
                name
            );
        }
    }

    #[test]
    fn test_full_name_rejects_other_shapes() {
        for name in [
            "Jane",
            "Jane  Doe",
            "Jane Mary Doe",
            "Jane-Ann Doe",
            "Jane Doe2",
            " Jane Doe",
            "Jane Doe ",
            "Zoë Doe",
        ] {
            let mut candidate = valid();
            candidate.full_name = name.to_string();
            let errors = validate_submission(&candidate).unwrap_err();
            assert_eq!(
                errors.rules_for("fullName"),
                vec![RuleKind::Format],
                "expected '{}' to fail format",
                name
            );
        }
    }

    #[test]
    fn test_email_format() {
        for ok in [
            "jane@x.com",
            "first.last+tag@mail.example.org",
            "jane@example.xn--p1ai",
        ] {
            let mut candidate = valid();
            candidate.email = ok.to_string();
            assert!(validate_submission(&candidate).is_ok(), "{}", ok);
        }
        for bad in [
            "bad",
            "jane@",
            "@x.com",
            "jane@localhost",
            "jane@x.",
            "jane x@x.com",
            "a@b.c",
            "a@b.123",
            "jane@.com",
        ] {
            let mut candidate = valid();
            candidate.email = bad.to_string();
            let errors = validate_submission(&candidate).unwrap_err();
            assert_eq!(errors.rules_for("email"), vec![RuleKind::Format], "{}", bad);
        }
    }

    #[test]
    fn test_phone_length_and_numeric_can_co_occur() {
        let mut candidate = valid();
        candidate.phone_number = "12345abc".to_string();
        let errors = validate_submission(&candidate).unwrap_err();
        assert_eq!(
            errors.rules_for("phoneNumber"),
            vec![RuleKind::Length, RuleKind::Numeric]
        );

        candidate.phone_number = "12345abcde".to_string();
        let errors = validate_submission(&candidate).unwrap_err();
        assert_eq!(errors.rules_for("phoneNumber"), vec![RuleKind::Numeric]);

        candidate.phone_number = "12345678901".to_string();
        let errors = validate_submission(&candidate).unwrap_err();
        assert_eq!(errors.rules_for("phoneNumber"), vec![RuleKind::Length]);
    }

    #[test]
    fn test_phone_rejects_signs_and_decimals() {
        for phone in ["+123456789", "12345.6789", "-123456789", "12345 6789"] {
            let mut candidate = valid();
            candidate.phone_number = phone.to_string();
            let errors = validate_submission(&candidate).unwrap_err();
            assert!(errors.has("phoneNumber", RuleKind::Numeric), "{}", phone);
        }
    }

    #[test]
    fn test_password_complexity_requires_each_class() {
        for weak in ["abcdefgh1", "ABCDEFGH1", "Abcdefghi", "Abcdef12!", "Abcd ef12"] {
            let mut candidate = valid();
            candidate.password = weak.to_string();
            let errors = validate_submission(&candidate).unwrap_err();
            assert_eq!(
                errors.rules_for("password"),
                vec![RuleKind::Complexity],
                "{}",
                weak
            );
        }
    }

    #[test]
    fn test_short_password_reports_length_and_complexity() {
        let mut candidate = valid();
        candidate.password = "Ab1".to_string();
        let errors = validate_submission(&candidate).unwrap_err();
        assert_eq!(errors.rules_for("password"), vec![RuleKind::Length]);

        candidate.password = "abc".to_string();
        let errors = validate_submission(&candidate).unwrap_err();
        assert_eq!(
            errors.rules_for("password"),
            vec![RuleKind::Length, RuleKind::Complexity]
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let candidate = input("J", "x@", "12a", "pw");
        let first = validate_submission(&candidate).unwrap_err();
        let second = validate_submission(&candidate).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn test_image_does_not_affect_validation() {
        let mut candidate = valid();
        candidate.image = Some(crate::models::UploadedFile {
            original_filename: "not-really.png".to_string(),
            content_type: "text/plain".to_string(),
            data: b"hello".to_vec(),
        });
        assert!(validate_submission(&candidate).is_ok());
    }
}
