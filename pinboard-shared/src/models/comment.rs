/// Comment model and database operations
///
/// Comments belong to a card and have a single author. Listings join the
/// author's profile fields and return newest-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Comment model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID (UUID v4)
    pub id: Uuid,

    pub content: String,

    /// Author
    pub user_id: Uuid,

    pub card_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment joined with the author's profile fields
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub card_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: String,
    pub author_avatar: Option<String>,
}

impl Comment {
    /// Creates a new comment
    pub async fn create(
        pool: &PgPool,
        card_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, user_id, card_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, user_id, card_id, created_at, updated_at
            "#,
        )
        .bind(content)
        .bind(user_id)
        .bind(card_id)
        .fetch_one(pool)
        .await
    }

    /// Finds a comment by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, user_id, card_id, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists a card's comments with author profiles, newest first
    pub async fn list_by_card(
        pool: &PgPool,
        card_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.content, c.user_id, c.card_id, c.created_at, c.updated_at,
                   u.name AS author_name, u.avatar AS author_avatar
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.card_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(card_id)
        .fetch_all(pool)
        .await
    }

    /// Rewrites a comment's content
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        content: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, content, user_id, card_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a comment
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
