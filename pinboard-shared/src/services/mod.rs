/// Domain services
///
/// Services compose model lookups, authorization policy, and persistence
/// into the operations the API exposes. Every board-scoped operation loads
/// the board up the ownership chain (card -> column -> board), checks the
/// acting user against [`crate::auth::policy`], and only then writes.

pub mod boards;
pub mod cards;
pub mod columns;
pub mod comments;
pub mod users;

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::policy;
use crate::models::board::{Board, BoardRole};
use crate::models::card::Card;
use crate::models::column::Column;

/// Error type for service operations
///
/// The API layer maps these onto HTTP statuses: `NotFound` -> 404,
/// `Forbidden` -> 403, `Unauthorized` -> 401, `Invalid` -> 400,
/// everything else -> 500.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The named resource does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The request is structurally valid but semantically wrong
    #[error("{0}")]
    Invalid(&'static str),

    /// The acting user lacks permission for the operation
    #[error("{0}")]
    Forbidden(&'static str),

    /// The acting user's credentials were rejected
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Password hashing failure
    #[error(transparent)]
    Password(#[from] crate::auth::password::PasswordError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Loads a board or reports it missing
pub(crate) async fn load_board(pool: &PgPool, board_id: Uuid) -> ServiceResult<Board> {
    Board::find_by_id(pool, board_id)
        .await?
        .ok_or(ServiceError::NotFound("Board"))
}

/// Loads a column or reports it missing
pub(crate) async fn load_column(pool: &PgPool, column_id: Uuid) -> ServiceResult<Column> {
    Column::find_by_id(pool, column_id)
        .await?
        .ok_or(ServiceError::NotFound("Column"))
}

/// Loads a card or reports it missing
pub(crate) async fn load_card(pool: &PgPool, card_id: Uuid) -> ServiceResult<Card> {
    Card::find_by_id(pool, card_id)
        .await?
        .ok_or(ServiceError::NotFound("Card"))
}

/// Loads the board owning a column
pub(crate) async fn board_of_column(pool: &PgPool, column: &Column) -> ServiceResult<Board> {
    load_board(pool, column.board_id).await
}

/// Loads the board owning a card, walking card -> column -> board
pub(crate) async fn board_of_card(pool: &PgPool, card: &Card) -> ServiceResult<Board> {
    let column = load_column(pool, card.column_id).await?;
    board_of_column(pool, &column).await
}

/// Requires the acting user's role on `board` to be in `required_roles`
///
/// The board creator always passes. On failure the operation-specific
/// `denial` message is surfaced as 403.
pub(crate) async fn require_role(
    pool: &PgPool,
    board: &Board,
    acting_user: Uuid,
    required_roles: &[BoardRole],
    denial: &'static str,
) -> ServiceResult<()> {
    let role = Board::member_role(pool, board.id, acting_user).await?;

    if !policy::can_perform(board, acting_user, role, required_roles) {
        return Err(ServiceError::Forbidden(denial));
    }

    Ok(())
}

/// Requires the acting user to be able to view `board`
pub(crate) async fn require_view(
    pool: &PgPool,
    board: &Board,
    acting_user: Uuid,
) -> ServiceResult<()> {
    let is_member = Board::is_member(pool, board.id, acting_user).await?;

    if !policy::can_view(board, acting_user, is_member) {
        return Err(ServiceError::Forbidden(
            "You do not have access to this board",
        ));
    }

    Ok(())
}
