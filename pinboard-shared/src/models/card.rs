/// Card model and database operations
///
/// Cards are units of work within a column. `position` is a dense,
/// zero-based ordering key unique within the column, derived as max+1 on
/// creation. Moving a card re-packs both affected columns inside a single
/// transaction so sibling positions stay dense under concurrent moves.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE cards (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     image VARCHAR(512),
///     position INTEGER NOT NULL,
///     column_id UUID NOT NULL REFERENCES columns(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (column_id, position) DEFERRABLE INITIALLY DEFERRED
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::label::Label;

/// Card model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    /// Unique card ID (UUID v4)
    pub id: Uuid,

    pub title: String,
    pub description: Option<String>,

    /// Optional cover image URL
    pub image: Option<String>,

    /// Zero-based ordering key, unique within the column
    pub position: i32,

    pub column_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new card
#[derive(Debug, Clone)]
pub struct CreateCard {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub column_id: Uuid,

    /// Explicit position; None derives max+1 within the column
    pub position: Option<i32>,
}

/// Input for updating an existing card
#[derive(Debug, Clone, Default)]
pub struct UpdateCard {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Result of a like toggle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LikeToggle {
    /// Whether the card is liked by the user after the toggle
    pub liked: bool,

    /// Total like count after the toggle
    pub likes: i64,
}

impl Card {
    /// Creates a new card
    ///
    /// Without an explicit position the card is appended: position becomes
    /// `max(existing) + 1`, or `0` when the column is empty.
    pub async fn create(pool: &PgPool, data: CreateCard) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (title, description, image, column_id, position)
            VALUES (
                $1, $2, $3, $4,
                COALESCE(
                    $5,
                    (SELECT COALESCE(MAX(position) + 1, 0) FROM cards WHERE column_id = $4)
                )
            )
            RETURNING id, title, description, image, position, column_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.image)
        .bind(data.column_id)
        .bind(data.position)
        .fetch_one(pool)
        .await
    }

    /// Finds a card by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Card>(
            r#"
            SELECT id, title, description, image, position, column_id,
                   created_at, updated_at
            FROM cards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists a column's cards ordered by position
    pub async fn list_by_column(pool: &PgPool, column_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Card>(
            r#"
            SELECT id, title, description, image, position, column_id,
                   created_at, updated_at
            FROM cards
            WHERE column_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(column_id)
        .fetch_all(pool)
        .await
    }

    /// Updates an existing card's content fields
    ///
    /// Only non-None fields in `data` are written. Positions are changed
    /// through [`Card::move_to`], not here.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateCard,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE cards SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.image.is_some() {
            bind_count += 1;
            query.push_str(&format!(", image = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, title, description, image, position, column_id, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Card>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(image) = data.image {
            q = q.bind(image);
        }

        q.fetch_optional(pool).await
    }

    /// Deletes a card (cascades to labels joins, likes, comments)
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Moves a card to `column_id` at zero-based `position`
    ///
    /// The whole move runs in one transaction: the source column closes the
    /// gap left by the card, the target column opens a slot, and the card is
    /// rewritten. Sibling positions therefore stay dense even under
    /// concurrent moves (the position uniqueness constraint is deferred to
    /// commit).
    ///
    /// A `position` past the end of the target column is clamped to the last
    /// slot, so out-of-range requests append instead of leaving a gap.
    ///
    /// Moving a card onto its current column and position issues no write.
    ///
    /// # Returns
    ///
    /// The moved card, or None if the card doesn't exist.
    pub async fn move_to(
        pool: &PgPool,
        id: Uuid,
        column_id: Uuid,
        position: i32,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current = sqlx::query_as::<_, Card>(
            r#"
            SELECT id, title, description, image, position, column_id,
                   created_at, updated_at
            FROM cards
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Ok(None);
        };

        // Clamp to the end of the target column; within the card's own
        // column the last slot is count - 1 because the card vacates one
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM cards WHERE column_id = $1")
                .bind(column_id)
                .fetch_one(&mut *tx)
                .await?;

        let end = if current.column_id == column_id {
            (count as i32 - 1).max(0)
        } else {
            count as i32
        };
        let position = position.min(end);

        if current.column_id == column_id && current.position == position {
            return Ok(Some(current));
        }

        if current.column_id == column_id {
            // Shift the cards between the old and new slot within one column
            if position > current.position {
                sqlx::query(
                    r#"
                    UPDATE cards SET position = position - 1, updated_at = NOW()
                    WHERE column_id = $1 AND position > $2 AND position <= $3
                    "#,
                )
                .bind(column_id)
                .bind(current.position)
                .bind(position)
                .execute(&mut *tx)
                .await?;
            } else {
                sqlx::query(
                    r#"
                    UPDATE cards SET position = position + 1, updated_at = NOW()
                    WHERE column_id = $1 AND position >= $2 AND position < $3
                    "#,
                )
                .bind(column_id)
                .bind(position)
                .bind(current.position)
                .execute(&mut *tx)
                .await?;
            }
        } else {
            // Close the gap in the source column
            sqlx::query(
                r#"
                UPDATE cards SET position = position - 1, updated_at = NOW()
                WHERE column_id = $1 AND position > $2
                "#,
            )
            .bind(current.column_id)
            .bind(current.position)
            .execute(&mut *tx)
            .await?;

            // Open a slot in the target column
            sqlx::query(
                r#"
                UPDATE cards SET position = position + 1, updated_at = NOW()
                WHERE column_id = $1 AND position >= $2
                "#,
            )
            .bind(column_id)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }

        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET column_id = $2, position = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, image, position, column_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(column_id)
        .bind(position)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(card))
    }

    /// Attaches a label to a card (idempotent)
    pub async fn add_label(
        pool: &PgPool,
        card_id: Uuid,
        label_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO card_labels (card_id, label_id)
            VALUES ($1, $2)
            ON CONFLICT (card_id, label_id) DO NOTHING
            "#,
        )
        .bind(card_id)
        .bind(label_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Detaches a label from a card
    pub async fn remove_label(
        pool: &PgPool,
        card_id: Uuid,
        label_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM card_labels WHERE card_id = $1 AND label_id = $2",
        )
        .bind(card_id)
        .bind(label_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the labels attached to a card
    pub async fn labels(pool: &PgPool, card_id: Uuid) -> Result<Vec<Label>, sqlx::Error> {
        sqlx::query_as::<_, Label>(
            r#"
            SELECT l.id, l.name, l.color
            FROM labels l
            JOIN card_labels cl ON cl.label_id = l.id
            WHERE cl.card_id = $1
            ORDER BY l.name ASC
            "#,
        )
        .bind(card_id)
        .fetch_all(pool)
        .await
    }

    /// Counts the likes on a card
    pub async fn like_count(pool: &PgPool, card_id: Uuid) -> Result<i64, sqlx::Error> {
        let (likes,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM card_likes WHERE card_id = $1")
                .bind(card_id)
                .fetch_one(pool)
                .await?;

        Ok(likes)
    }

    /// Checks whether a user has liked a card
    pub async fn is_liked_by(
        pool: &PgPool,
        card_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM card_likes
                WHERE card_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(exists.0)
    }

    /// Toggles a user's like on a card
    ///
    /// Deletes the (card, user) like row if present, creates it otherwise,
    /// then reports the resulting state and total count.
    pub async fn toggle_like(
        pool: &PgPool,
        card_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeToggle, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query(
            "DELETE FROM card_likes WHERE card_id = $1 AND user_id = $2",
        )
        .bind(card_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let liked = if deleted.rows_affected() == 0 {
            sqlx::query("INSERT INTO card_likes (card_id, user_id) VALUES ($1, $2)")
                .bind(card_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            true
        } else {
            false
        };

        let (likes,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM card_likes WHERE card_id = $1")
                .bind(card_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(LikeToggle { liked, likes })
    }
}
