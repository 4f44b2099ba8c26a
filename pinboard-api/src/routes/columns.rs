/// Column endpoints
///
/// - `GET /v1/columns/board/:board_id` - List a board's columns with cards
/// - `POST /v1/columns/board/:board_id` - Create a column
/// - `PUT /v1/columns/board/:board_id/reorder` - Reorder a board's columns
/// - `PUT /v1/columns/:id` - Update a column
/// - `DELETE /v1/columns/:id` - Delete a column

use crate::{
    app::AppState,
    error::{ApiError, ApiResponse, ApiResult},
    routes::validate_request,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use pinboard_shared::{
    auth::middleware::AuthContext,
    models::column::{Column, UpdateColumn},
    services::columns::{self, ColumnWithCards},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Column creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateColumnRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    /// Explicit position; omitted means append at the end
    pub position: Option<i32>,
}

/// Column update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateColumnRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: Option<String>,

    pub position: Option<i32>,
}

/// Column reorder request: column ids in their desired order
#[derive(Debug, Deserialize)]
pub struct ReorderColumnsRequest {
    pub column_ids: Vec<Uuid>,
}

/// Lists a board's columns with their cards
pub async fn list_columns(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<ColumnWithCards>>>> {
    let columns = columns::list_for_board(&state.db, board_id, auth.user_id).await?;

    Ok(ApiResponse::new(columns))
}

/// Creates a column at the end of the board
pub async fn create_column(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<Uuid>,
    Json(req): Json<CreateColumnRequest>,
) -> ApiResult<Json<ApiResponse<Column>>> {
    validate_request(&req)?;

    let column =
        columns::create(&state.db, board_id, auth.user_id, req.title, req.position).await?;

    Ok(ApiResponse::new(column))
}

/// Updates a column
pub async fn update_column(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateColumnRequest>,
) -> ApiResult<Json<ApiResponse<Column>>> {
    validate_request(&req)?;

    let column = columns::update(
        &state.db,
        id,
        auth.user_id,
        UpdateColumn {
            title: req.title,
            position: req.position,
        },
    )
    .await?;

    Ok(ApiResponse::new(column))
}

/// Deletes a column and its cards
pub async fn delete_column(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    columns::delete(&state.db, id, auth.user_id).await?;

    Ok(ApiResponse::new(serde_json::json!({ "deleted": true })))
}

/// Rewrites a board's column order
///
/// Each column's position becomes its index in `column_ids`.
pub async fn reorder_columns(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<Uuid>,
    Json(req): Json<ReorderColumnsRequest>,
) -> ApiResult<Json<ApiResponse<Vec<Column>>>> {
    if req.column_ids.is_empty() {
        return Err(ApiError::BadRequest(
            "column_ids must not be empty".to_string(),
        ));
    }

    let columns = columns::reorder(&state.db, board_id, auth.user_id, &req.column_ids).await?;

    Ok(ApiResponse::new(columns))
}
