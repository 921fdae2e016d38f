//! Chat session types
//!
//! A session is one conversation thread with its own message history and
//! a title derived from the first user message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::message::Message;

/// Maximum number of words taken from the first message for the title
const TITLE_MAX_WORDS: usize = 5;

/// Maximum number of characters kept from the title excerpt
const TITLE_MAX_CHARS: usize = 30;

/// One conversation thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    /// Opaque unique identifier, stable for the session's lifetime
    pub id: String,
    /// Title derived once at creation, never recomputed
    pub title: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Messages in chronological order, append-only
    pub messages: Vec<Message>,
}

impl ChatSession {
    /// Create a session seeded with its first message.
    ///
    /// The title is derived from the first message content and fixed for
    /// the session's lifetime.
    pub fn new(id: impl Into<String>, first_message: Message) -> Self {
        Self {
            id: id.into(),
            title: derive_title(&first_message.content),
            created_at: Utc::now(),
            messages: vec![first_message],
        }
    }
}

/// Derive a session title from the first user message.
///
/// Takes the first five whitespace-separated words, keeps at most 30
/// characters of that excerpt, and appends "..." when the excerpt was
/// longer. The cut operates on the excerpt, not the whole message, so a
/// short excerpt never grows an ellipsis even if the message goes on.
pub fn derive_title(content: &str) -> String {
    let excerpt = content
        .split_whitespace()
        .take(TITLE_MAX_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    let mut title: String = excerpt.chars().take(TITLE_MAX_CHARS).collect();
    if excerpt.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_seeds_first_message() {
        let msg = Message::user("Salom dunyo");
        let session = ChatSession::new("123", msg.clone());
        assert_eq!(session.id, "123");
        assert_eq!(session.messages, vec![msg]);
        assert_eq!(session.title, "Salom dunyo");
    }

    #[test]
    fn test_title_short_message_kept_whole() {
        assert_eq!(derive_title("Salom dunyo"), "Salom dunyo");
    }

    #[test]
    fn test_title_takes_first_five_words() {
        // Sixth word and beyond never reach the title.
        assert_eq!(derive_title("a b c d e f g h"), "a b c d e");
    }

    #[test]
    fn test_title_truncates_long_excerpt() {
        let title = derive_title("Sun'iy intellekt haqida qisqa hikoya aytib bering");
        // Five-word excerpt is 36 chars; the first 30 end in a space.
        assert_eq!(title, "Sun'iy intellekt haqida qisqa ...");
    }

    #[test]
    fn test_title_exact_boundary_no_ellipsis() {
        let word = "a".repeat(30);
        assert_eq!(derive_title(&word), word);
    }

    #[test]
    fn test_title_one_past_boundary_gets_ellipsis() {
        let word = "a".repeat(31);
        let expected = format!("{}...", "a".repeat(30));
        assert_eq!(derive_title(&word), expected);
    }

    #[test]
    fn test_title_multibyte_safe() {
        // Cyrillic input must be cut on char boundaries, not bytes.
        let content = "Интеллект ҳақида қисқа ҳикоя айтиб беринг";
        let title = derive_title(content);
        assert!(title.ends_with("..."));
        assert_eq!(title.chars().count(), 33);
    }

    #[test]
    fn test_session_round_trip() {
        let session = ChatSession::new("1700000000000", Message::user("hello there friend"));
        let json = serde_json::to_string(&session).unwrap();
        let back: ChatSession = serde_json::from_str(&json).unwrap();
        assert_eq!(session, back);
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let session = ChatSession::new("1", Message::user("hi"));
        let value = serde_json::to_value(&session).unwrap();
        assert!(value.get("createdAt").is_some());
    }
}
