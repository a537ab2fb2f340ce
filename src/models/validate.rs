//! Field checks shared by the request-to-record conversions.

use crate::errors::AppError;

/// Trim a required text field, rejecting blank or oversized values.
pub(crate) fn required_text(field: &str, value: &str, max_len: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    check_len(field, trimmed, max_len)?;
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank becomes `None`.
pub(crate) fn optional_text(
    field: &str,
    value: Option<&str>,
    max_len: usize,
) -> Result<Option<String>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            check_len(field, trimmed, max_len)?;
            Ok(Some(trimmed.to_string()))
        }
    }
}

fn check_len(field: &str, value: &str, max_len: usize) -> Result<(), AppError> {
    if value.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}
