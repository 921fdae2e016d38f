//! Gemini generateContent client
//!
//! One POST per prompt against the Gemini API with a fixed sampling
//! configuration. Creator questions are answered from the canned reply
//! before any credential check or network traffic.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::generator::{canned_response, GeneratorError, ResponseGenerator};

const GENERATE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// Fixed sampling configuration, not tunable.
const TEMPERATURE: f32 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f32 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 8192;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Text of the first candidate, or `None` when the shape is off
fn extract_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
}

fn build_request(prompt: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
            top_k: TOP_K,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        },
    }
}

/// Client for the Gemini generateContent endpoint
pub struct GeminiClient {
    api_key: Option<String>,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            http: reqwest::Client::new(),
        }
    }

    /// Build the client from the `GEMINI_API_KEY` environment variable
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set, generation requests will be rejected");
        }
        Self::new(api_key)
    }
}

#[async_trait::async_trait]
impl ResponseGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        if let Some(reply) = canned_response(prompt) {
            tracing::debug!("answering creator question from canned reply");
            return Ok(reply.to_string());
        }

        let api_key = self.api_key.as_deref().ok_or(GeneratorError::Configuration)?;

        let response = self
            .http
            .post(GENERATE_URL)
            .query(&[("key", api_key)])
            .timeout(REQUEST_TIMEOUT)
            .json(&build_request(prompt))
            .send()
            .await
            .map_err(|e| GeneratorError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "generation API returned an error: {body}");
            return Err(GeneratorError::Upstream(format!(
                "API request failed: {status}"
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|_| GeneratorError::Format)?;
        extract_text(body).ok_or(GeneratorError::Format)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_wire_shape() {
        let value = serde_json::to_value(build_request("Hello")).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "Hello");

        let config = &value["generationConfig"];
        assert_eq!(config["topK"], 40);
        assert_eq!(config["maxOutputTokens"], 8192);
        assert!((config["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((config["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_extract_text_happy_path() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"hi there"}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(extract_text(response), Some("hi there".to_string()));
    }

    #[test]
    fn test_extract_text_rejects_malformed_shapes() {
        for body in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{}]}}]}"#,
        ] {
            let response: GenerateResponse = serde_json::from_str(body).unwrap();
            assert_eq!(extract_text(response), None, "{body}");
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let client = GeminiClient::new(None);
        assert!(!client.is_configured());

        let err = client.generate("Tell me a story").await.unwrap_err();
        assert!(matches!(err, GeneratorError::Configuration));
    }

    #[tokio::test]
    async fn test_canned_reply_bypasses_credential_and_network() {
        // No key configured: a real request would fail with a
        // configuration error, so an Ok here proves the canned path
        // answered before any call was attempted.
        let client = GeminiClient::new(None);
        let reply = client.generate("Sizni kim yaratgan?").await.unwrap();
        assert!(reply.starts_with("aGPT was created by"));
    }
}
