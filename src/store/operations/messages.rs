use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::store::{
    error::Result,
    types::{Sender, StoredMessage},
};

pub(crate) fn parse_message_row(row: &Row) -> Result<StoredMessage> {
    let sender_tag: String = row.try_get("sender")?;

    Ok(StoredMessage {
        id: row.try_get("id")?,
        chat_session_id: row.try_get("chat_session_id")?,
        sender: Sender::parse(&sender_tag)?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Store one message in a chat session
pub async fn create_message(
    pool: &Pool,
    chat_session_id: Uuid,
    sender: Sender,
    content: &str,
) -> Result<StoredMessage> {
    let conn = pool.get().await?;

    let row = conn
        .query_one(
            "INSERT INTO messages (id, chat_session_id, sender, content) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, chat_session_id, sender, content, created_at",
            &[&Uuid::new_v4(), &chat_session_id, &sender.as_str(), &content],
        )
        .await?;

    parse_message_row(&row)
}

/// List a session's messages, oldest first
pub async fn messages_for_session(
    pool: &Pool,
    chat_session_id: Uuid,
) -> Result<Vec<StoredMessage>> {
    let conn = pool.get().await?;

    let rows = conn
        .query(
            "SELECT id, chat_session_id, sender, content, created_at FROM messages \
             WHERE chat_session_id = $1 ORDER BY created_at ASC",
            &[&chat_session_id],
        )
        .await?;

    rows.iter().map(parse_message_row).collect()
}
