//! Relational store for users, chat sessions, messages, and
//! conversations, backed by PostgreSQL.

pub mod client;
pub mod connection;
pub mod error;
pub mod operations;
pub mod schema;
pub mod types;

// Re-export main types for convenience
pub use client::Store;
pub use connection::{StoreConfig, DEFAULT_DATABASE_URL};
pub use error::{Error, Result};
pub use types::{ChatSession, Conversation, Sender, StoredMessage, User};
