pub mod answers;
pub mod questions;
pub mod users;

use crate::error::ApiError;

/// Rejects empty or whitespace-only text fields
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}
