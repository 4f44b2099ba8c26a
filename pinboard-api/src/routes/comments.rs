/// Comment endpoints
///
/// - `GET /v1/comments/card/:card_id` - List a card's comments
/// - `POST /v1/comments/card/:card_id` - Create a comment
/// - `PUT /v1/comments/:id` - Edit a comment (author only)
/// - `DELETE /v1/comments/:id` - Delete a comment

use crate::{
    app::AppState,
    error::{ApiResponse, ApiResult},
    routes::validate_request,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use pinboard_shared::{
    auth::middleware::AuthContext,
    models::comment::{Comment, CommentWithAuthor},
    services::comments,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Comment create/update request
#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Content must be between 1 and 2000 characters"
    ))]
    pub content: String,
}

/// Lists a card's comments with author profiles, newest first
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(card_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<CommentWithAuthor>>>> {
    let comments = comments::list_for_card(&state.db, card_id, auth.user_id).await?;

    Ok(ApiResponse::new(comments))
}

/// Creates a comment on a card
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(card_id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<Json<ApiResponse<Comment>>> {
    validate_request(&req)?;

    let comment = comments::create(&state.db, card_id, auth.user_id, &req.content).await?;

    Ok(ApiResponse::new(comment))
}

/// Edits a comment (author only)
pub async fn update_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<Json<ApiResponse<Comment>>> {
    validate_request(&req)?;

    let comment = comments::update(&state.db, id, auth.user_id, &req.content).await?;

    Ok(ApiResponse::new(comment))
}

/// Deletes a comment (author, board creator, or admin-level member)
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    comments::delete(&state.db, id, auth.user_id).await?;

    Ok(ApiResponse::new(serde_json::json!({ "deleted": true })))
}
