/// Column service
///
/// Column CRUD and whole-board reorder. Creation and updates require editor
/// access (any member role or the creator); deletion requires the creator or
/// an admin-level member.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::policy::{EDITOR_ROLES, MANAGER_ROLES};
use crate::models::card::Card;
use crate::models::column::{Column, CreateColumn, UpdateColumn};

use super::{
    board_of_column, load_board, load_column, require_role, require_view, ServiceError,
    ServiceResult,
};

/// A column with its cards loaded, as returned by board listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnWithCards {
    #[serde(flatten)]
    pub column: Column,

    /// The column's cards ordered by position
    pub cards: Vec<Card>,
}

/// Lists a board's columns with their cards, both ordered by position
pub async fn list_for_board(
    pool: &PgPool,
    board_id: Uuid,
    acting_user: Uuid,
) -> ServiceResult<Vec<ColumnWithCards>> {
    let board = load_board(pool, board_id).await?;
    require_view(pool, &board, acting_user).await?;

    let columns = Column::list_by_board(pool, board_id).await?;

    let mut result = Vec::with_capacity(columns.len());
    for column in columns {
        let cards = Card::list_by_column(pool, column.id).await?;
        result.push(ColumnWithCards { column, cards });
    }

    Ok(result)
}

/// Creates a column at the end of the board (editor access)
pub async fn create(
    pool: &PgPool,
    board_id: Uuid,
    acting_user: Uuid,
    title: String,
    position: Option<i32>,
) -> ServiceResult<Column> {
    let board = load_board(pool, board_id).await?;
    require_role(
        pool,
        &board,
        acting_user,
        EDITOR_ROLES,
        "You do not have permission to add columns to this board",
    )
    .await?;

    Ok(Column::create(
        pool,
        CreateColumn {
            title,
            board_id,
            position,
        },
    )
    .await?)
}

/// Updates a column (editor access)
pub async fn update(
    pool: &PgPool,
    column_id: Uuid,
    acting_user: Uuid,
    data: UpdateColumn,
) -> ServiceResult<Column> {
    let column = load_column(pool, column_id).await?;
    let board = board_of_column(pool, &column).await?;
    require_role(
        pool,
        &board,
        acting_user,
        EDITOR_ROLES,
        "You do not have permission to update columns on this board",
    )
    .await?;

    Column::update(pool, column_id, data)
        .await?
        .ok_or(ServiceError::NotFound("Column"))
}

/// Deletes a column and its cards (creator or admin-level member)
pub async fn delete(pool: &PgPool, column_id: Uuid, acting_user: Uuid) -> ServiceResult<()> {
    let column = load_column(pool, column_id).await?;
    let board = board_of_column(pool, &column).await?;
    require_role(
        pool,
        &board,
        acting_user,
        MANAGER_ROLES,
        "You do not have permission to delete columns on this board",
    )
    .await?;

    Column::delete(pool, column_id).await?;

    Ok(())
}

/// Rewrites a board's column order to match `column_ids` (editor access)
///
/// Each column's position becomes its index in the list. `column_ids` must
/// list every column of the board exactly once; a partial or duplicated
/// list would leave positions gapped or colliding, so it is rejected
/// before any write. Returns the board's columns in their new order.
pub async fn reorder(
    pool: &PgPool,
    board_id: Uuid,
    acting_user: Uuid,
    column_ids: &[Uuid],
) -> ServiceResult<Vec<Column>> {
    let board = load_board(pool, board_id).await?;
    require_role(
        pool,
        &board,
        acting_user,
        EDITOR_ROLES,
        "You do not have permission to reorder columns on this board",
    )
    .await?;

    let existing: HashSet<Uuid> = Column::list_by_board(pool, board_id)
        .await?
        .iter()
        .map(|c| c.id)
        .collect();

    let requested: HashSet<Uuid> = column_ids.iter().copied().collect();
    if requested.len() != column_ids.len() || requested != existing {
        return Err(ServiceError::Invalid(
            "column_ids must list every column of the board exactly once",
        ));
    }

    Column::reorder(pool, board_id, column_ids).await?;

    Ok(Column::list_by_board(pool, board_id).await?)
}
