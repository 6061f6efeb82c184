use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::store::{
    error::Result,
    types::Conversation,
};

pub(crate) fn parse_conversation_row(row: &Row) -> Result<Conversation> {
    Ok(Conversation {
        id: row.try_get("id")?,
        prompt: row.try_get("prompt")?,
        response: row.try_get("response")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Store a prompt/response pair
pub async fn create_conversation(
    pool: &Pool,
    prompt: &str,
    response: &str,
) -> Result<Conversation> {
    let conn = pool.get().await?;

    let row = conn
        .query_one(
            "INSERT INTO conversations (id, prompt, response) \
             VALUES ($1, $2, $3) \
             RETURNING id, prompt, response, created_at",
            &[&Uuid::new_v4(), &prompt, &response],
        )
        .await?;

    parse_conversation_row(&row)
}

/// Retrieve a conversation by id, or None when absent
pub async fn get_conversation(pool: &Pool, id: Uuid) -> Result<Option<Conversation>> {
    let conn = pool.get().await?;

    let row = conn
        .query_opt(
            "SELECT id, prompt, response, created_at FROM conversations WHERE id = $1",
            &[&id],
        )
        .await?;

    row.as_ref().map(parse_conversation_row).transpose()
}

/// List conversations, newest first, with offset/limit pagination
pub async fn list_conversations(pool: &Pool, skip: i64, limit: i64) -> Result<Vec<Conversation>> {
    let conn = pool.get().await?;

    let rows = conn
        .query(
            "SELECT id, prompt, response, created_at FROM conversations \
             ORDER BY created_at DESC OFFSET $1 LIMIT $2",
            &[&skip, &limit],
        )
        .await?;

    rows.iter().map(parse_conversation_row).collect()
}
