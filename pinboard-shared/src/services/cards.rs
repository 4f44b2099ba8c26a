/// Card service
///
/// Card CRUD, moves, labels, and likes. Permission checks walk the
/// ownership chain card -> column -> board before any write. Moves are
/// authorized against the target column's board, so a card cannot be pushed
/// into a board the actor has no editor access to.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::policy::{EDITOR_ROLES, MANAGER_ROLES};
use crate::models::card::{Card, CreateCard, LikeToggle, UpdateCard};
use crate::models::comment::{Comment, CommentWithAuthor};
use crate::models::label::Label;

use super::{
    board_of_card, board_of_column, load_card, load_column, require_role, require_view,
    ServiceError, ServiceResult,
};

/// A card with its labels, comments, and like state, as returned by detail
/// lookups
#[derive(Debug, Clone, Serialize)]
pub struct CardDetail {
    #[serde(flatten)]
    pub card: Card,

    pub labels: Vec<Label>,

    /// Comments with author profiles, newest first
    pub comments: Vec<CommentWithAuthor>,

    /// Total like count
    pub likes: i64,

    /// Whether the acting user has liked this card
    pub liked: bool,
}

/// Lists a column's cards ordered by position
pub async fn list_for_column(
    pool: &PgPool,
    column_id: Uuid,
    acting_user: Uuid,
) -> ServiceResult<Vec<Card>> {
    let column = load_column(pool, column_id).await?;
    let board = board_of_column(pool, &column).await?;
    require_view(pool, &board, acting_user).await?;

    Ok(Card::list_by_column(pool, column_id).await?)
}

/// Fetches a card with labels and like state
pub async fn get(pool: &PgPool, card_id: Uuid, acting_user: Uuid) -> ServiceResult<CardDetail> {
    let card = load_card(pool, card_id).await?;
    let board = board_of_card(pool, &card).await?;
    require_view(pool, &board, acting_user).await?;

    let labels = Card::labels(pool, card_id).await?;
    let comments = Comment::list_by_card(pool, card_id).await?;
    let likes = Card::like_count(pool, card_id).await?;
    let liked = Card::is_liked_by(pool, card_id, acting_user).await?;

    Ok(CardDetail {
        card,
        labels,
        comments,
        likes,
        liked,
    })
}

/// Creates a card at the end of a column (editor access)
pub async fn create(
    pool: &PgPool,
    column_id: Uuid,
    acting_user: Uuid,
    title: String,
    description: Option<String>,
    image: Option<String>,
    position: Option<i32>,
) -> ServiceResult<Card> {
    let column = load_column(pool, column_id).await?;
    let board = board_of_column(pool, &column).await?;
    require_role(
        pool,
        &board,
        acting_user,
        EDITOR_ROLES,
        "You do not have permission to add cards to this board",
    )
    .await?;

    Ok(Card::create(
        pool,
        CreateCard {
            title,
            description,
            image,
            column_id,
            position,
        },
    )
    .await?)
}

/// Updates a card's content fields (editor access)
pub async fn update(
    pool: &PgPool,
    card_id: Uuid,
    acting_user: Uuid,
    data: UpdateCard,
) -> ServiceResult<Card> {
    let card = load_card(pool, card_id).await?;
    let board = board_of_card(pool, &card).await?;
    require_role(
        pool,
        &board,
        acting_user,
        EDITOR_ROLES,
        "You do not have permission to update cards on this board",
    )
    .await?;

    Card::update(pool, card_id, data)
        .await?
        .ok_or(ServiceError::NotFound("Card"))
}

/// Deletes a card (creator or admin-level member)
pub async fn delete(pool: &PgPool, card_id: Uuid, acting_user: Uuid) -> ServiceResult<()> {
    let card = load_card(pool, card_id).await?;
    let board = board_of_card(pool, &card).await?;
    require_role(
        pool,
        &board,
        acting_user,
        MANAGER_ROLES,
        "You do not have permission to delete cards on this board",
    )
    .await?;

    Card::delete(pool, card_id).await?;

    Ok(())
}

/// Moves a card to `column_id` at zero-based `position` (editor access)
///
/// The check runs against the target column's board. When the target is the
/// card's current column the source board is the same, so one check covers
/// both sides; cross-board moves are rejected before any write.
///
/// A `position` past the end of the target column appends instead. Moving a
/// card onto its current column and position is a no-op: the card is
/// returned unchanged and no write is issued.
pub async fn move_card(
    pool: &PgPool,
    card_id: Uuid,
    acting_user: Uuid,
    column_id: Uuid,
    position: i32,
) -> ServiceResult<Card> {
    let card = load_card(pool, card_id).await?;

    let target_column = load_column(pool, column_id).await?;
    let target_board = board_of_column(pool, &target_column).await?;

    let source_column = load_column(pool, card.column_id).await?;
    if source_column.board_id != target_board.id {
        return Err(ServiceError::Forbidden(
            "Cards cannot be moved between boards",
        ));
    }

    require_role(
        pool,
        &target_board,
        acting_user,
        EDITOR_ROLES,
        "You do not have permission to move cards on this board",
    )
    .await?;

    if card.column_id == column_id && card.position == position {
        return Ok(card);
    }

    Card::move_to(pool, card_id, column_id, position)
        .await?
        .ok_or(ServiceError::NotFound("Card"))
}

/// Attaches a label to a card, creating the (name, color) label if absent
/// (editor access)
pub async fn add_label(
    pool: &PgPool,
    card_id: Uuid,
    acting_user: Uuid,
    name: &str,
    color: &str,
) -> ServiceResult<Label> {
    let card = load_card(pool, card_id).await?;
    let board = board_of_card(pool, &card).await?;
    require_role(
        pool,
        &board,
        acting_user,
        EDITOR_ROLES,
        "You do not have permission to manage labels on this board",
    )
    .await?;

    let label = Label::find_or_create(pool, name, color).await?;
    Card::add_label(pool, card_id, label.id).await?;

    Ok(label)
}

/// Detaches a label from a card (editor access)
pub async fn remove_label(
    pool: &PgPool,
    card_id: Uuid,
    acting_user: Uuid,
    label_id: Uuid,
) -> ServiceResult<()> {
    let card = load_card(pool, card_id).await?;
    let board = board_of_card(pool, &card).await?;
    require_role(
        pool,
        &board,
        acting_user,
        EDITOR_ROLES,
        "You do not have permission to manage labels on this board",
    )
    .await?;

    let removed = Card::remove_label(pool, card_id, label_id).await?;
    if !removed {
        return Err(ServiceError::NotFound("Label"));
    }

    Ok(())
}

/// Toggles the acting user's like on a card
///
/// Any user who can view the card may like it; no role is required.
pub async fn toggle_like(
    pool: &PgPool,
    card_id: Uuid,
    acting_user: Uuid,
) -> ServiceResult<LikeToggle> {
    let card = load_card(pool, card_id).await?;
    let board = board_of_card(pool, &card).await?;
    require_view(pool, &board, acting_user).await?;

    Ok(Card::toggle_like(pool, card_id, acting_user).await?)
}
