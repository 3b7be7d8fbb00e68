//! LLM Client — the single point of entry for all generative-AI calls in DevAura.
//!
//! ARCHITECTURAL RULE: No other module may call the provider API directly.
//! All LLM interactions MUST go through `CompletionProvider`.
//!
//! Provider: Google Generative Language API (`generateContent`).
//! One request per call. No retries: quota and rate-limit handling belong to
//! the provider, and callers spread load through the `KeyRotator` instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::LlmConfig;

pub mod key_rotator;
pub mod prompts;

pub use key_rotator::KeyRotator;

const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_OUTPUT_TOKENS: u32 = 2048;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("No API key available")]
    MissingCredential,
}

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

/// Provider-neutral completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub turns: Vec<Turn>,
}

impl CompletionRequest {
    pub fn single(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            turns: vec![Turn::user(prompt)],
        }
    }
}

/// Something that can turn a prompt into completion text.
///
/// `LlmClient` is the production backend. Services hold an
/// `Arc<dyn CompletionProvider>` so tests can substitute a stub.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, api_key: &str, request: &CompletionRequest)
        -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: WireContent<'a>,
    contents: Vec<WireContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    candidate_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// HTTP client for the `generateContent` endpoint. Cheap to clone.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.base_url, config.model
            ),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes one call to the provider and returns the parsed response.
    pub async fn generate(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        if api_key.is_empty() {
            return Err(LlmError::MissingCredential);
        }

        let body = GenerateContentRequest {
            system_instruction: WireContent {
                role: None,
                parts: vec![WirePart {
                    text: &request.system,
                }],
            },
            contents: request
                .turns
                .iter()
                .map(|turn| WireContent {
                    role: Some(turn.role.as_str()),
                    parts: vec![WirePart { text: &turn.text }],
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                candidate_count: 1,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ProviderError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={:?}, output_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, LlmError> {
        let response = self.generate(api_key, request).await?;
        if let Some(reason) = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            debug!("LLM finish reason: {reason}");
        }
        response.text().ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const PATH: &str = "/v1beta/models/test-model:generateContent";

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new(&LlmConfig {
            base_url: server.base_url(),
            model: "test-model".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn candidate_body(parts: &[&str]) -> serde_json::Value {
        let parts: Vec<_> = parts.iter().map(|t| json!({ "text": t })).collect();
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": parts },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 34 }
        })
    }

    #[tokio::test]
    async fn test_complete_sends_key_and_returns_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(PATH)
                    .header(API_KEY_HEADER, "key-1")
                    .body_contains("\"systemInstruction\"")
                    .body_contains("hello there");
                then.status(200).json_body(candidate_body(&["Hi", " back"]));
            })
            .await;

        let client = client_for(&server);
        let text = client
            .complete("key-1", &CompletionRequest::single("be nice", "hello there"))
            .await
            .unwrap();

        assert_eq!(text, "Hi back");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_multi_turn_roles_are_sent() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(PATH)
                    .body_contains("\"role\":\"model\"")
                    .body_contains("\"role\":\"user\"");
                then.status(200).json_body(candidate_body(&["ok"]));
            })
            .await;

        let request = CompletionRequest {
            system: "sys".to_string(),
            turns: vec![
                Turn::user("first"),
                Turn {
                    role: Role::Model,
                    text: "answer".to_string(),
                },
                Turn::user("second"),
            ],
        };
        let text = client_for(&server).complete("k", &request).await.unwrap();

        assert_eq!(text, "ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_extracts_provider_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(PATH);
                then.status(400).json_body(json!({
                    "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
                }));
            })
            .await;

        let err = client_for(&server)
            .complete("bad", &CompletionRequest::single("s", "p"))
            .await
            .unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept_raw() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(PATH);
                then.status(503).body("upstream unavailable");
            })
            .await;

        let err = client_for(&server)
            .complete("k", &CompletionRequest::single("s", "p"))
            .await
            .unwrap_err();

        assert!(
            matches!(err, LlmError::Api { status: 503, ref message } if message == "upstream unavailable")
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_is_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(PATH);
                then.status(200).body("{not json");
            })
            .await;

        let err = client_for(&server)
            .complete("k", &CompletionRequest::single("s", "p"))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_content() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(PATH);
                then.status(200).json_body(json!({ "candidates": [] }));
            })
            .await;

        let err = client_for(&server)
            .complete("k", &CompletionRequest::single("s", "p"))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_empty_key_fails_without_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200).json_body(candidate_body(&["never"]));
            })
            .await;

        let err = client_for(&server)
            .complete("", &CompletionRequest::single("s", "p"))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::MissingCredential));
        mock.assert_hits_async(0).await;
    }

    #[test]
    fn test_text_skips_parts_without_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "a" }, {}, { "text": "b" }] } }]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("ab"));
    }
}
