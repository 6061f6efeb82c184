use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::error::{Error, Result};

/// Sender tag on a stored message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Human input
    User,
    /// Model output
    Assistant,
    /// Behavior-defining agent instructions
    #[serde(rename = "agent-prompt")]
    AgentPrompt,
}

impl Sender {
    /// The tag as stored in the `sender` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
            Sender::AgentPrompt => "agent-prompt",
        }
    }

    /// Parse a stored sender tag
    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            "user" => Ok(Sender::User),
            "assistant" => Ok(Sender::Assistant),
            "agent-prompt" => Ok(Sender::AgentPrompt),
            other => Err(Error::DatabaseError(format!(
                "Unknown sender tag in database: {}",
                other
            ))),
        }
    }
}

/// A registered user
///
/// Never mutated after creation.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A conversation thread belonging to one user
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One turn in a chat session, immutable once created
#[derive(Debug, Clone)]
pub struct StoredMessage {
    pub id: Uuid,
    pub chat_session_id: Uuid,
    pub sender: Sender,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A single prompt/response pair from the single-table revision
#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: Uuid,
    pub prompt: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_round_trip() {
        for sender in [Sender::User, Sender::Assistant, Sender::AgentPrompt] {
            assert_eq!(Sender::parse(sender.as_str()).unwrap(), sender);
        }
    }

    #[test]
    fn test_sender_parse_unknown() {
        assert!(Sender::parse("operator").is_err());
    }

    #[test]
    fn test_sender_serialization() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Sender::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(
            serde_json::to_string(&Sender::AgentPrompt).unwrap(),
            "\"agent-prompt\""
        );
    }

    #[test]
    fn test_sender_deserialization() {
        let sender: Sender = serde_json::from_str("\"agent-prompt\"").unwrap();
        assert_eq!(sender, Sender::AgentPrompt);

        assert!(serde_json::from_str::<Sender>("\"robot\"").is_err());
    }
}
