use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Reserved peer id for the AI dietitian side of a transcript.
pub const AI_PEER: Uuid = Uuid::nil();

/// Append-only chat transcript row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub body: String,
    pub created_at: OffsetDateTime,
}

pub async fn append(
    db: &PgPool,
    sender_id: Uuid,
    receiver_id: Uuid,
    body: &str,
) -> anyhow::Result<Message> {
    let row = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (sender_id, receiver_id, body)
        VALUES ($1, $2, $3)
        RETURNING id, sender_id, receiver_id, body, created_at
        "#,
    )
    .bind(sender_id)
    .bind(receiver_id)
    .bind(body)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Last `limit` messages between the user and the AI peer, oldest first.
pub async fn transcript(db: &PgPool, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<Message>> {
    let mut rows = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, sender_id, receiver_id, body, created_at
        FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY created_at DESC
        LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(AI_PEER)
    .bind(limit)
    .fetch_all(db)
    .await?;
    rows.reverse();
    Ok(rows)
}
