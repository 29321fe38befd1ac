use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

use super::types::DomainError;

/// Plates are free text; the lot stores them trimmed and upper-cased.
pub fn normalize_plate(raw: &str) -> String {
    raw.trim().to_uppercase()
}

pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("hourly rate must be zero or positive".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Flatten `validator` output into a single [`DomainError::Validation`].
pub fn into_domain_error(errors: ValidationErrors) -> DomainError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();
    messages.sort();
    DomainError::Validation(messages.join("; "))
}
