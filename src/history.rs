//! In-memory conversation history
//!
//! The ordered sequence of role-tagged entries sent to the generation
//! backend as context. Index 0 is reserved for the system entry: its
//! content is updated in place when the caller supplies a different
//! system prompt, and a second system entry is never inserted.
//!
//! The process-wide instance behind [`SharedHistory`] is one
//! conversation shared by every caller. Callers that need isolation
//! supply their own history per request instead. The sequence grows
//! without bound; nothing truncates it against the model's context
//! length.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::llm::{ChatMessage, Role};

/// Process-wide history, shared across all request handlers
pub type SharedHistory = Arc<Mutex<ChatHistory>>;

/// Create an empty shared history
pub fn shared() -> SharedHistory {
    Arc::new(Mutex::new(ChatHistory::new()))
}

/// An ordered sequence of role-tagged conversation entries
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    entries: Vec<ChatMessage>,
}

impl ChatHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a history from caller-supplied entries
    pub fn from_entries(entries: Vec<ChatMessage>) -> Self {
        Self { entries }
    }

    /// Install or refresh the system prompt
    ///
    /// An empty history gains a system entry at index 0. Otherwise
    /// index 0 is the system slot: when the supplied prompt differs
    /// from its content, the content is rewritten in place.
    pub fn apply_system_prompt(&mut self, prompt: &str) {
        match self.entries.first_mut() {
            None => self.entries.push(ChatMessage::system(prompt)),
            Some(slot) => {
                if slot.content != prompt {
                    slot.content = prompt.to_string();
                }
            }
        }
    }

    /// Append a user entry
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.entries.push(ChatMessage::user(content));
    }

    /// Append an assistant entry
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.entries.push(ChatMessage::assistant(content));
    }

    /// The entries, oldest first
    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    /// Snapshot the entries for a generation call or a response body
    pub fn to_vec(&self) -> Vec<ChatMessage> {
        self.entries.clone()
    }

    /// Consume the history, returning its entries
    pub fn into_entries(self) -> Vec<ChatMessage> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_installs_system_entry() {
        let mut history = ChatHistory::new();
        history.apply_system_prompt("You are helpful.");

        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].role, Role::System);
        assert_eq!(history.entries()[0].content, "You are helpful.");
    }

    #[test]
    fn test_changed_prompt_rewrites_slot_in_place() {
        let mut history = ChatHistory::new();
        history.apply_system_prompt("You are helpful.");
        history.push_user("hi");
        history.push_assistant("hello");

        history.apply_system_prompt("You are terse.");

        // Rewritten in place: same slot, no second system entry
        assert_eq!(history.len(), 3);
        assert_eq!(history.entries()[0].role, Role::System);
        assert_eq!(history.entries()[0].content, "You are terse.");
        assert_eq!(history.entries()[1].role, Role::User);
    }

    #[test]
    fn test_same_prompt_is_a_no_op() {
        let mut history = ChatHistory::new();
        history.apply_system_prompt("You are helpful.");
        let before = history.to_vec();

        history.apply_system_prompt("You are helpful.");

        assert_eq!(history.to_vec(), before);
    }

    #[test]
    fn test_history_grows_by_two_per_exchange() {
        let mut history = ChatHistory::new();

        for turn in 0..3 {
            let before = history.len();
            history.apply_system_prompt("You are helpful.");
            history.push_user(format!("question {}", turn));
            history.push_assistant(format!("answer {}", turn));

            let expected = if turn == 0 { 3 } else { before + 2 };
            assert_eq!(history.len(), expected);
        }

        // One system entry, then alternating user/assistant
        let roles: Vec<Role> = history.entries().iter().map(|e| e.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
            ]
        );
    }

    #[test]
    fn test_from_entries_preserves_caller_history() {
        let supplied = vec![
            ChatMessage::system("You are helpful."),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
        ];
        let mut history = ChatHistory::from_entries(supplied.clone());

        history.apply_system_prompt("You are helpful.");
        assert_eq!(history.to_vec(), supplied);

        history.push_user("more");
        assert_eq!(history.len(), 4);
    }
}
