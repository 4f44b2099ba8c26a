/// Board model, memberships, and database operations
///
/// Boards are the top-level containers. Each board has exactly one creator
/// and any number of members, each with a role. Creating a board inserts the
/// creator as `owner` in the same transaction.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE board_role AS ENUM ('owner', 'admin', 'member');
///
/// CREATE TABLE boards (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     color VARCHAR(32),
///     category VARCHAR(64),
///     creator_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     is_public BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE board_members (
///     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role board_role NOT NULL DEFAULT 'member',
///     joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (board_id, user_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Membership roles on a board
///
/// Hierarchy: the creator outranks everyone, then `owner` > `admin` > `member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "board_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BoardRole {
    /// Full control over the board (assigned to the creator)
    Owner,

    /// Can manage membership, delete columns/cards, remove others' comments
    Admin,

    /// Can create and update columns and cards, move cards, manage labels
    Member,
}

impl BoardRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardRole::Owner => "owner",
            BoardRole::Admin => "admin",
            BoardRole::Member => "member",
        }
    }
}

/// Board model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    /// Unique board ID (UUID v4)
    pub id: Uuid,

    pub title: String,
    pub description: Option<String>,

    /// Display color tag
    pub color: Option<String>,

    /// Category tag
    pub category: Option<String>,

    /// The owning user; cannot be removed through membership removal
    pub creator_id: Uuid,

    /// Public boards grant read access to any authenticated user
    pub is_public: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Board membership row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoardMember {
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub role: BoardRole,
    pub joined_at: DateTime<Utc>,
}

/// Membership joined with the member's profile fields
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoardMemberProfile {
    pub user_id: Uuid,
    pub role: BoardRole,
    pub joined_at: DateTime<Utc>,
    pub name: String,
    pub avatar: Option<String>,
}

/// Input for creating a new board
#[derive(Debug, Clone)]
pub struct CreateBoard {
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
    pub is_public: bool,
    pub creator_id: Uuid,
}

/// Input for updating an existing board
///
/// Only non-None fields are updated.
#[derive(Debug, Clone, Default)]
pub struct UpdateBoard {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
    pub is_public: Option<bool>,
}

impl Board {
    /// Creates a new board and its creator's `owner` membership in one
    /// transaction
    pub async fn create(pool: &PgPool, data: CreateBoard) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (title, description, color, category, creator_id, is_public)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, color, category, creator_id, is_public,
                      created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.color)
        .bind(data.category)
        .bind(data.creator_id)
        .bind(data.is_public)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO board_members (board_id, user_id, role)
            VALUES ($1, $2, 'owner')
            "#,
        )
        .bind(board.id)
        .bind(data.creator_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(board)
    }

    /// Finds a board by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Board>(
            r#"
            SELECT id, title, description, color, category, creator_id, is_public,
                   created_at, updated_at
            FROM boards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists boards the user created or is a member of, most recently
    /// updated first
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Board>(
            r#"
            SELECT DISTINCT b.id, b.title, b.description, b.color, b.category,
                   b.creator_id, b.is_public, b.created_at, b.updated_at
            FROM boards b
            LEFT JOIN board_members m ON m.board_id = b.id
            WHERE b.creator_id = $1 OR m.user_id = $1
            ORDER BY b.updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Updates an existing board
    ///
    /// Only non-None fields in `data` are written.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateBoard,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE boards SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.color.is_some() {
            bind_count += 1;
            query.push_str(&format!(", color = ${}", bind_count));
        }
        if data.category.is_some() {
            bind_count += 1;
            query.push_str(&format!(", category = ${}", bind_count));
        }
        if data.is_public.is_some() {
            bind_count += 1;
            query.push_str(&format!(", is_public = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, title, description, color, category, creator_id, is_public, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Board>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(color) = data.color {
            q = q.bind(color);
        }
        if let Some(category) = data.category {
            q = q.bind(category);
        }
        if let Some(is_public) = data.is_public {
            q = q.bind(is_public);
        }

        q.fetch_optional(pool).await
    }

    /// Deletes a board
    ///
    /// Cascades to columns, cards, labels joins, likes, comments, and
    /// memberships via foreign keys.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Adds a member to a board
    ///
    /// # Errors
    ///
    /// Returns an error if the membership already exists or the user/board
    /// is missing (constraint violations).
    pub async fn add_member(
        pool: &PgPool,
        board_id: Uuid,
        user_id: Uuid,
        role: BoardRole,
    ) -> Result<BoardMember, sqlx::Error> {
        sqlx::query_as::<_, BoardMember>(
            r#"
            INSERT INTO board_members (board_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING board_id, user_id, role, joined_at
            "#,
        )
        .bind(board_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(pool)
        .await
    }

    /// Removes a member from a board
    ///
    /// Callers must reject removal of the board creator before calling this.
    pub async fn remove_member(
        pool: &PgPool,
        board_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM board_members WHERE board_id = $1 AND user_id = $2",
        )
        .bind(board_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks if a user is a member of a board (any role)
    pub async fn is_member(
        pool: &PgPool,
        board_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM board_members
                WHERE board_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(board_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(exists.0)
    }

    /// Gets a user's role on a board, if they are a member
    pub async fn member_role(
        pool: &PgPool,
        board_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<BoardRole>, sqlx::Error> {
        let role: Option<(BoardRole,)> = sqlx::query_as(
            r#"
            SELECT role FROM board_members
            WHERE board_id = $1 AND user_id = $2
            "#,
        )
        .bind(board_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(role.map(|(r,)| r))
    }

    /// Lists a board's members joined with their profile fields
    pub async fn list_members(
        pool: &PgPool,
        board_id: Uuid,
    ) -> Result<Vec<BoardMemberProfile>, sqlx::Error> {
        sqlx::query_as::<_, BoardMemberProfile>(
            r#"
            SELECT m.user_id, m.role, m.joined_at, u.name, u.avatar
            FROM board_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.board_id = $1
            ORDER BY m.joined_at ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(BoardRole::Owner.as_str(), "owner");
        assert_eq!(BoardRole::Admin.as_str(), "admin");
        assert_eq!(BoardRole::Member.as_str(), "member");
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&BoardRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");

        let role: BoardRole = serde_json::from_str("\"member\"").unwrap();
        assert_eq!(role, BoardRole::Member);
    }

    #[test]
    fn test_update_board_default_is_empty() {
        let update = UpdateBoard::default();
        assert!(update.title.is_none());
        assert!(update.is_public.is_none());
    }
}
