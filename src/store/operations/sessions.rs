use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::store::{
    error::Result,
    types::ChatSession,
};

pub(crate) fn parse_session_row(row: &Row) -> Result<ChatSession> {
    Ok(ChatSession {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Create a chat session owned by the given user
pub async fn create_session(pool: &Pool, user_id: Uuid) -> Result<ChatSession> {
    let conn = pool.get().await?;

    let row = conn
        .query_one(
            "INSERT INTO chat_sessions (id, user_id) \
             VALUES ($1, $2) \
             RETURNING id, user_id, created_at",
            &[&Uuid::new_v4(), &user_id],
        )
        .await?;

    parse_session_row(&row)
}

/// Retrieve a session by id, or None when absent
pub async fn get_session(pool: &Pool, id: Uuid) -> Result<Option<ChatSession>> {
    let conn = pool.get().await?;

    let row = conn
        .query_opt(
            "SELECT id, user_id, created_at FROM chat_sessions WHERE id = $1",
            &[&id],
        )
        .await?;

    row.as_ref().map(parse_session_row).transpose()
}

/// List a user's sessions, newest first
pub async fn sessions_for_user(pool: &Pool, user_id: Uuid) -> Result<Vec<ChatSession>> {
    let conn = pool.get().await?;

    let rows = conn
        .query(
            "SELECT id, user_id, created_at FROM chat_sessions \
             WHERE user_id = $1 ORDER BY created_at DESC",
            &[&user_id],
        )
        .await?;

    rows.iter().map(parse_session_row).collect()
}
