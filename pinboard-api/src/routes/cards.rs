/// Card endpoints
///
/// - `GET /v1/cards/column/:column_id` - List a column's cards
/// - `POST /v1/cards/column/:column_id` - Create a card
/// - `GET /v1/cards/:id` - Fetch a card with labels and like state
/// - `PUT /v1/cards/:id` - Update a card's content
/// - `DELETE /v1/cards/:id` - Delete a card
/// - `PUT /v1/cards/:id/move` - Move a card to a column/position
/// - `POST /v1/cards/:id/labels` - Attach a label
/// - `DELETE /v1/cards/:id/labels/:label_id` - Detach a label
/// - `POST /v1/cards/:id/like` - Toggle the caller's like

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
    models::card::{Card, LikeToggle, UpdateCard},
    models::label::Label,
    services::cards::{self, CardDetail},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Card creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCardRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,

    /// Explicit position; omitted means append at the end
    pub position: Option<i32>,
}

/// Card update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCardRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,
}

/// Card move request
#[derive(Debug, Deserialize)]
pub struct MoveCardRequest {
    /// Target column (may be the card's current column)
    pub column_id: Uuid,

    /// Zero-based position within the target column
    pub position: i32,
}

/// Label attachment request
///
/// Labels are shared (name, color) pairs; attaching creates the label if it
/// does not exist yet.
#[derive(Debug, Deserialize, Validate)]
pub struct AddLabelRequest {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Label name must be between 1 and 64 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 32,
        message = "Label color must be between 1 and 32 characters"
    ))]
    pub color: String,
}

/// Lists a column's cards ordered by position
pub async fn list_cards(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(column_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Card>>>> {
    let cards = cards::list_for_column(&state.db, column_id, auth.user_id).await?;

    Ok(ApiResponse::new(cards))
}

/// Creates a card at the end of a column
pub async fn create_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(column_id): Path<Uuid>,
    Json(req): Json<CreateCardRequest>,
) -> ApiResult<Json<ApiResponse<Card>>> {
    validate_request(&req)?;

    let card = cards::create(
        &state.db,
        column_id,
        auth.user_id,
        req.title,
        req.description,
        req.image,
        req.position,
    )
    .await?;

    Ok(ApiResponse::new(card))
}

/// Fetches a card with labels and like state
pub async fn get_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<CardDetail>>> {
    let card = cards::get(&state.db, id, auth.user_id).await?;

    Ok(ApiResponse::new(card))
}

/// Updates a card's content fields
pub async fn update_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCardRequest>,
) -> ApiResult<Json<ApiResponse<Card>>> {
    validate_request(&req)?;

    let card = cards::update(
        &state.db,
        id,
        auth.user_id,
        UpdateCard {
            title: req.title,
            description: req.description,
            image: req.image,
        },
    )
    .await?;

    Ok(ApiResponse::new(card))
}

/// Deletes a card
pub async fn delete_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    cards::delete(&state.db, id, auth.user_id).await?;

    Ok(ApiResponse::new(serde_json::json!({ "deleted": true })))
}

/// Moves a card to a column at a zero-based position
///
/// A move onto the card's current column and position is a no-op and
/// returns the card unchanged.
pub async fn move_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveCardRequest>,
) -> ApiResult<Json<ApiResponse<Card>>> {
    if req.position < 0 {
        return Err(ApiError::BadRequest(
            "position must be non-negative".to_string(),
        ));
    }

    let card = cards::move_card(&state.db, id, auth.user_id, req.column_id, req.position).await?;

    Ok(ApiResponse::new(card))
}

/// Attaches a label to a card, creating the (name, color) pair if absent
pub async fn add_label(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddLabelRequest>,
) -> ApiResult<Json<ApiResponse<Label>>> {
    validate_request(&req)?;

    let label = cards::add_label(&state.db, id, auth.user_id, &req.name, &req.color).await?;

    Ok(ApiResponse::new(label))
}

/// Detaches a label from a card
pub async fn remove_label(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((id, label_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    cards::remove_label(&state.db, id, auth.user_id, label_id).await?;

    Ok(ApiResponse::new(serde_json::json!({ "removed": true })))
}

/// Toggles the caller's like on a card
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<LikeToggle>>> {
    let toggle = cards::toggle_like(&state.db, id, auth.user_id).await?;

    Ok(ApiResponse::new(toggle))
}
