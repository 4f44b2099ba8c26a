/// Column model and database operations
///
/// Columns are the ordered lanes of a board. `position` is a dense,
/// zero-based ordering key unique within the board; it is derived as
/// max+1 on creation (0 for an empty board) and rewritten transactionally
/// on reorder.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE columns (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     position INTEGER NOT NULL,
///     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (board_id, position) DEFERRABLE INITIALLY DEFERRED
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Column model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Column {
    /// Unique column ID (UUID v4)
    pub id: Uuid,

    pub title: String,

    /// Zero-based ordering key, unique within the board
    pub position: i32,

    pub board_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new column
#[derive(Debug, Clone)]
pub struct CreateColumn {
    pub title: String,
    pub board_id: Uuid,

    /// Explicit position; None derives max+1 within the board
    pub position: Option<i32>,
}

/// Input for updating an existing column
#[derive(Debug, Clone, Default)]
pub struct UpdateColumn {
    pub title: Option<String>,
    pub position: Option<i32>,
}

impl Column {
    /// Creates a new column
    ///
    /// Without an explicit position the column is appended: position becomes
    /// `max(existing) + 1`, or `0` when the board has no columns.
    pub async fn create(pool: &PgPool, data: CreateColumn) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Column>(
            r#"
            INSERT INTO columns (title, board_id, position)
            VALUES (
                $1, $2,
                COALESCE(
                    $3,
                    (SELECT COALESCE(MAX(position) + 1, 0) FROM columns WHERE board_id = $2)
                )
            )
            RETURNING id, title, position, board_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.board_id)
        .bind(data.position)
        .fetch_one(pool)
        .await
    }

    /// Finds a column by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Column>(
            r#"
            SELECT id, title, position, board_id, created_at, updated_at
            FROM columns
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists a board's columns ordered by position
    pub async fn list_by_board(pool: &PgPool, board_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Column>(
            r#"
            SELECT id, title, position, board_id, created_at, updated_at
            FROM columns
            WHERE board_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await
    }

    /// Updates an existing column
    ///
    /// Only non-None fields in `data` are written.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateColumn,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE columns SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.position.is_some() {
            bind_count += 1;
            query.push_str(&format!(", position = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, title, position, board_id, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Column>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(position) = data.position {
            q = q.bind(position);
        }

        q.fetch_optional(pool).await
    }

    /// Deletes a column (cascades to its cards)
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM columns WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Rewrites column positions to match the order of `column_ids`
    ///
    /// Each column's position becomes its index in the list. All updates run
    /// in a single transaction so a concurrent reorder cannot interleave and
    /// leave duplicate or gapped positions. Ids not belonging to `board_id`
    /// are ignored.
    pub async fn reorder(
        pool: &PgPool,
        board_id: Uuid,
        column_ids: &[Uuid],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (index, column_id) in column_ids.iter().enumerate() {
            sqlx::query(
                r#"
                UPDATE columns
                SET position = $3, updated_at = NOW()
                WHERE id = $1 AND board_id = $2
                "#,
            )
            .bind(column_id)
            .bind(board_id)
            .bind(index as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
