pub mod customer_service;
pub mod product_service;
pub mod purchase_service;
pub mod report_service;

use crate::error::{AppError, AppResult};

/// Trims `value` and rejects it when nothing is left.
fn required_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
