// Handlers module

pub mod chat;
pub mod chat_stream;
pub mod conversations;
pub mod generate;
pub mod messages;
pub mod sessions;
pub mod users;

pub use chat::chat_handler;
pub use chat_stream::chat_stream_handler;
pub use conversations::{get_conversation_handler, list_conversations_handler};
pub use generate::generate_handler;
pub use messages::{create_message_handler, list_session_messages_handler};
pub use sessions::{create_session_handler, list_user_sessions_handler};
pub use users::{create_user_handler, get_user_handler};
