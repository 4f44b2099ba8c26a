/// API route handlers
///
/// - `auth`: registration, login, token refresh
/// - `users`: authenticated user profile
/// - `boards`: boards and membership
/// - `columns`: columns and reorder
/// - `cards`: cards, moves, labels, likes
/// - `comments`: card comments
/// - `health`: health check

pub mod auth;
pub mod boards;
pub mod cards;
pub mod columns;
pub mod comments;
pub mod health;
pub mod users;

use crate::error::{ApiError, ValidationErrorDetail};
use validator::Validate;

/// Runs `validator` checks on a request body and maps failures into a 422
pub(crate) fn validate_request<T: Validate>(req: &T) -> Result<(), ApiError> {
    req.validate().map_err(|e| {
        let errors: Vec<ValidationErrorDetail> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        ApiError::ValidationError(errors)
    })
}
