/// Board endpoints
///
/// - `GET /v1/boards` - List the caller's boards
/// - `POST /v1/boards` - Create a board
/// - `GET /v1/boards/:id` - Fetch a board
/// - `PUT /v1/boards/:id` - Update a board
/// - `DELETE /v1/boards/:id` - Delete a board (creator only)
/// - `GET /v1/boards/:id/members` - List members
/// - `POST /v1/boards/:id/members` - Add a member
/// - `DELETE /v1/boards/:id/members/:user_id` - Remove a member

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
    models::board::{Board, BoardMember, BoardMemberProfile, BoardRole, UpdateBoard},
    services::boards,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Board creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 32, message = "Color must be at most 32 characters"))]
    pub color: Option<String>,

    #[validate(length(max = 64, message = "Category must be at most 64 characters"))]
    pub category: Option<String>,

    #[serde(default)]
    pub is_public: bool,
}

/// Board update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBoardRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 32, message = "Color must be at most 32 characters"))]
    pub color: Option<String>,

    #[validate(length(max = 64, message = "Category must be at most 64 characters"))]
    pub category: Option<String>,

    pub is_public: Option<bool>,
}

/// Member addition request
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Uuid,

    /// Role for the new member (default: member)
    #[serde(default = "default_member_role")]
    pub role: BoardRole,
}

fn default_member_role() -> BoardRole {
    BoardRole::Member
}

/// Lists boards the caller created or belongs to
pub async fn list_boards(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<Vec<Board>>>> {
    let boards = boards::list_for_user(&state.db, auth.user_id).await?;

    Ok(ApiResponse::new(boards))
}

/// Creates a board owned by the caller
pub async fn create_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<Json<ApiResponse<Board>>> {
    validate_request(&req)?;

    let board = boards::create(
        &state.db,
        auth.user_id,
        req.title,
        req.description,
        req.color,
        req.category,
        req.is_public,
    )
    .await?;

    Ok(ApiResponse::new(board))
}

/// Fetches a single board
pub async fn get_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Board>>> {
    let board = boards::get(&state.db, id, auth.user_id).await?;

    Ok(ApiResponse::new(board))
}

/// Updates a board (creator or admin-level member)
pub async fn update_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBoardRequest>,
) -> ApiResult<Json<ApiResponse<Board>>> {
    validate_request(&req)?;

    let board = boards::update(
        &state.db,
        id,
        auth.user_id,
        UpdateBoard {
            title: req.title,
            description: req.description,
            color: req.color,
            category: req.category,
            is_public: req.is_public,
        },
    )
    .await?;

    Ok(ApiResponse::new(board))
}

/// Deletes a board (creator only)
pub async fn delete_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    boards::delete(&state.db, id, auth.user_id).await?;

    Ok(ApiResponse::new(serde_json::json!({ "deleted": true })))
}

/// Lists a board's members with their profile fields
pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<BoardMemberProfile>>>> {
    let members = boards::members(&state.db, id, auth.user_id).await?;

    Ok(ApiResponse::new(members))
}

/// Adds a member to a board (creator or admin-level member)
pub async fn add_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<Json<ApiResponse<BoardMember>>> {
    let member = boards::add_member(&state.db, id, auth.user_id, req.user_id, req.role).await?;

    Ok(ApiResponse::new(member))
}

/// Removes a member from a board
///
/// The board creator can never be removed.
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    boards::remove_member(&state.db, id, auth.user_id, user_id).await?;

    Ok(ApiResponse::new(serde_json::json!({ "removed": true })))
}
