/// Authenticated user profile endpoints
///
/// - `GET /v1/users/me` - Fetch the caller's profile
/// - `PUT /v1/users/me` - Update profile fields
/// - `PUT /v1/users/me/password` - Change password

use crate::{
    app::AppState,
    error::{ApiError, ApiResponse, ApiResult, ValidationErrorDetail},
    routes::validate_request,
};
use axum::{extract::State, Extension, Json};
use pinboard_shared::{
    auth::{middleware::AuthContext, password},
    models::user::Profile,
    services::users,
};
use serde::Deserialize;
use validator::Validate;

/// Profile update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,

    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar: Option<String>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
}

/// Password change request
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Fetches the authenticated user's profile
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<Profile>>> {
    let profile = users::get_profile(&state.db, auth.user_id).await?;

    Ok(ApiResponse::new(profile))
}

/// Updates the authenticated user's profile fields
pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ApiResponse<Profile>>> {
    validate_request(&req)?;

    let profile =
        users::update_profile(&state.db, auth.user_id, req.name, req.avatar, req.bio).await?;

    Ok(ApiResponse::new(profile))
}

/// Changes the authenticated user's password
///
/// # Errors
///
/// - `401 Unauthorized`: Current password is incorrect
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    validate_request(&req)?;

    password::validate_password_strength(&req.new_password).map_err(|e| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "new_password".to_string(),
            message: e,
        }])
    })?;

    users::change_password(
        &state.db,
        auth.user_id,
        &req.current_password,
        &req.new_password,
    )
    .await?;

    Ok(ApiResponse::new(serde_json::json!({ "updated": true })))
}
