// Store operations organized by entity

pub mod conversations;
pub mod messages;
pub mod sessions;
pub mod users;

pub use conversations::{create_conversation, get_conversation, list_conversations};
pub use messages::{create_message, messages_for_session};
pub use sessions::{create_session, get_session, sessions_for_user};
pub use users::{create_user, get_user};
