/// Board service
///
/// Board CRUD and membership management. Update requires the creator or an
/// admin-level member; delete is creator-only; the creator can never be
/// removed from membership.

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::policy::MANAGER_ROLES;
use crate::models::board::{
    Board, BoardMember, BoardMemberProfile, BoardRole, CreateBoard, UpdateBoard,
};

use super::{load_board, require_role, require_view, ServiceError, ServiceResult};

/// Lists boards the user created or belongs to, most recently updated first
pub async fn list_for_user(pool: &PgPool, acting_user: Uuid) -> ServiceResult<Vec<Board>> {
    Ok(Board::list_for_user(pool, acting_user).await?)
}

/// Fetches a single board the user may view
pub async fn get(pool: &PgPool, board_id: Uuid, acting_user: Uuid) -> ServiceResult<Board> {
    let board = load_board(pool, board_id).await?;
    require_view(pool, &board, acting_user).await?;

    Ok(board)
}

/// Creates a board owned by the acting user
pub async fn create(
    pool: &PgPool,
    acting_user: Uuid,
    title: String,
    description: Option<String>,
    color: Option<String>,
    category: Option<String>,
    is_public: bool,
) -> ServiceResult<Board> {
    let board = Board::create(
        pool,
        CreateBoard {
            title,
            description,
            color,
            category,
            is_public,
            creator_id: acting_user,
        },
    )
    .await?;

    Ok(board)
}

/// Updates a board (creator or admin-level member)
pub async fn update(
    pool: &PgPool,
    board_id: Uuid,
    acting_user: Uuid,
    data: UpdateBoard,
) -> ServiceResult<Board> {
    let board = load_board(pool, board_id).await?;
    require_role(
        pool,
        &board,
        acting_user,
        MANAGER_ROLES,
        "You do not have permission to update this board",
    )
    .await?;

    Board::update(pool, board_id, data)
        .await?
        .ok_or(ServiceError::NotFound("Board"))
}

/// Deletes a board (creator only)
pub async fn delete(pool: &PgPool, board_id: Uuid, acting_user: Uuid) -> ServiceResult<()> {
    let board = load_board(pool, board_id).await?;

    if board.creator_id != acting_user {
        return Err(ServiceError::Forbidden(
            "Only the board creator can delete the board",
        ));
    }

    Board::delete(pool, board_id).await?;

    Ok(())
}

/// Lists a board's members with their profile fields
pub async fn members(
    pool: &PgPool,
    board_id: Uuid,
    acting_user: Uuid,
) -> ServiceResult<Vec<BoardMemberProfile>> {
    let board = load_board(pool, board_id).await?;
    require_view(pool, &board, acting_user).await?;

    Ok(Board::list_members(pool, board_id).await?)
}

/// Adds a member to a board (creator or admin-level member)
pub async fn add_member(
    pool: &PgPool,
    board_id: Uuid,
    acting_user: Uuid,
    member_user_id: Uuid,
    role: BoardRole,
) -> ServiceResult<BoardMember> {
    let board = load_board(pool, board_id).await?;
    require_role(
        pool,
        &board,
        acting_user,
        MANAGER_ROLES,
        "You do not have permission to manage this board's members",
    )
    .await?;

    if Board::is_member(pool, board_id, member_user_id).await? {
        return Err(ServiceError::Forbidden(
            "User is already a member of this board",
        ));
    }

    Ok(Board::add_member(pool, board_id, member_user_id, role).await?)
}

/// Removes a member from a board (creator or admin-level member)
///
/// The board creator can never be removed.
pub async fn remove_member(
    pool: &PgPool,
    board_id: Uuid,
    acting_user: Uuid,
    member_user_id: Uuid,
) -> ServiceResult<()> {
    let board = load_board(pool, board_id).await?;
    require_role(
        pool,
        &board,
        acting_user,
        MANAGER_ROLES,
        "You do not have permission to manage this board's members",
    )
    .await?;

    if !crate::auth::policy::can_remove_member(&board, member_user_id) {
        return Err(ServiceError::Forbidden(
            "The board creator cannot be removed",
        ));
    }

    let removed = Board::remove_member(pool, board_id, member_user_id).await?;
    if !removed {
        return Err(ServiceError::NotFound("Member"));
    }

    Ok(())
}
