//! Response generation
//!
//! Stateless client for the external text-generation endpoint, behind a
//! trait so the conversation engine can be tested without the network.

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// Response generation errors
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("API key not configured. Set GEMINI_API_KEY in the environment")]
    Configuration,
    #[error("generation request failed: {0}")]
    Upstream(String),
    #[error("unexpected response format from generation API")]
    Format,
}

/// One generation request: prompt in, text out.
///
/// Single attempt, no retry, no caching; recovery from failure is the
/// user retrying manually.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;

    /// Whether a credential is available. The engine rejects sends up
    /// front when this is false instead of attempting the call.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Trigger phrases answered with the canned creator biography instead of
/// the external service, matched case-insensitively (English and Uzbek).
const CREATOR_TRIGGERS: &[&str] = &[
    "who made you",
    "who created you",
    "your creator",
    "kim yaratgan",
    "kim yaratdi",
    "yaratuvchi",
];

/// Fixed answer for creator questions
const CREATOR_REPLY: &str = "aGPT was created by A'lamov Asadbek, a talented developer and AI \
enthusiast. He designed me to be a helpful assistant powered by advanced AI technology. If \
you'd like to learn more about him or get in touch, you can use the \"Help\" option in the \
main interface.";

/// Return the canned reply if the prompt asks about the creator
pub fn canned_response(prompt: &str) -> Option<&'static str> {
    let lowered = prompt.to_lowercase();
    CREATOR_TRIGGERS
        .iter()
        .any(|trigger| lowered.contains(trigger))
        .then_some(CREATOR_REPLY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_response_matches_all_triggers() {
        for prompt in [
            "Who made you?",
            "tell me, who created you exactly?",
            "I am curious about YOUR CREATOR",
            "Sizni kim yaratgan?",
            "Seni kim yaratdi?",
            "yaratuvchingiz haqida gapirib bering",
        ] {
            assert_eq!(canned_response(prompt), Some(CREATOR_REPLY), "{prompt}");
        }
    }

    #[test]
    fn test_canned_response_ignores_other_prompts() {
        assert_eq!(canned_response("Tell me a story"), None);
        assert_eq!(canned_response(""), None);
    }
}
