/// Label model and database operations
///
/// Labels are shared (name, color) pairs attached to cards through the
/// `card_labels` join table. The pair is unique; attaching a label a card
/// already carries is a no-op at the join level.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Label model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Label {
    /// Unique label ID (UUID v4)
    pub id: Uuid,

    pub name: String,
    pub color: String,
}

impl Label {
    /// Finds a label by (name, color), creating it if absent
    ///
    /// Uses an upsert so concurrent callers converge on the same row.
    pub async fn find_or_create(
        pool: &PgPool,
        name: &str,
        color: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Label>(
            r#"
            INSERT INTO labels (name, color)
            VALUES ($1, $2)
            ON CONFLICT (name, color) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name, color
            "#,
        )
        .bind(name)
        .bind(color)
        .fetch_one(pool)
        .await
    }
}
