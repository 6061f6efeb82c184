use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::store::{
    error::Result,
    types::User,
};

pub(crate) fn parse_user_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Create a user and return the stored row
///
/// # Errors
///
/// * `Error::Conflict` - the username or email is already registered
/// * `Error::DatabaseError` - for connection or SQL errors
pub async fn create_user(
    pool: &Pool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User> {
    let conn = pool.get().await?;

    let row = conn
        .query_one(
            "INSERT INTO users (id, username, email, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, username, email, password_hash, created_at",
            &[&Uuid::new_v4(), &username, &email, &password_hash],
        )
        .await?;

    parse_user_row(&row)
}

/// Retrieve a user by id, or None when absent
pub async fn get_user(pool: &Pool, id: Uuid) -> Result<Option<User>> {
    let conn = pool.get().await?;

    let row = conn
        .query_opt(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1",
            &[&id],
        )
        .await?;

    row.as_ref().map(parse_user_row).transpose()
}
