//! Generation client - Gemini text generation over REST
//!
//! One prompt string in, one reply string out. The client is deliberately
//! forgiving: a blank prompt, a transport failure, an API error, or an empty
//! reply all surface as a reported error plus the literal `"{}"` so the
//! per-page loop keeps walking and the normalizer fills every field with its
//! placeholder. A single blocking call per page, no retry, no backoff.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// GenerationProvider Trait
// ============================================================================

/// Text-generation service boundary.
///
/// `generate` never fails its caller; every failure mode collapses to the
/// empty-object reply. Tests swap in a mock implementation.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Send a prompt, get raw reply text (expected to be JSON, not enforced
    /// here - shape validation is the normalizer's job).
    async fn generate(&self, prompt: &str) -> String;

    /// Provider name for logs.
    fn name(&self) -> &str;
}

// ============================================================================
// Google Gemini Client
// ============================================================================

/// Gemini generateContent endpoint.
/// source: https://ai.google.dev/api/generate-content
const GEMINI_GENERATE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

/// Reply returned whenever the provider cannot produce text.
pub const EMPTY_REPLY: &str = "{}";

/// Gemini REST client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Read the API key from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(get_api_key()?))
    }

    /// One generateContent call, fallible. `generate` wraps this and maps
    /// every failure to [`EMPTY_REPLY`].
    async fn request(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(GEMINI_GENERATE_URL)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Provider {
                message: format!("failed to send generation request: {e}"),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| Error::Provider {
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            // API errors carry a structured body worth surfacing
            if let Ok(error) = serde_json::from_str::<GeminiError>(&body) {
                return Err(Error::Provider {
                    message: format!(
                        "Gemini API error ({}): {}",
                        error.error.status, error.error.message
                    ),
                });
            }
            return Err(Error::Provider {
                message: format!("Gemini API error ({status}): {body}"),
            });
        }

        let reply: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| Error::Provider {
                message: format!("failed to parse generation response: {e}"),
            })?;

        let text = reply
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::Provider {
                message: "received an empty response from the model".to_string(),
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> String {
        if prompt.trim().is_empty() {
            tracing::error!("input text is empty; cannot generate response");
            return EMPTY_REPLY.to_string();
        }

        match self.request(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("error while getting response from API: {e}");
                EMPTY_REPLY.to_string()
            }
        }
    }

    fn name(&self) -> &str {
        "gemini-pro"
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini API error body.
#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
    #[serde(default)]
    status: String,
}

// ============================================================================
// API Key Management
// ============================================================================

/// Load the API key from the environment.
///
/// Priority: `GEMINI_API_KEY`, then `GOOGLE_API_KEY`.
pub fn get_api_key() -> Result<String> {
    for var in ["GEMINI_API_KEY", "GOOGLE_API_KEY"] {
        if let Ok(key) = std::env::var(var) {
            if !key.is_empty() {
                tracing::debug!("using API key from {var}");
                return Ok(key);
            }
        }
    }
    Err(Error::Provider {
        message: "API key not found. Set GEMINI_API_KEY or GOOGLE_API_KEY.\n\
                  Get your API key at: https://aistudio.google.com/app/apikey"
            .to_string(),
    })
}

/// Whether an API key is configured.
pub fn has_api_key() -> bool {
    ["GEMINI_API_KEY", "GOOGLE_API_KEY"]
        .iter()
        .any(|var| std::env::var(var).is_ok_and(|key| !key.is_empty()))
}

// ============================================================================
// Tests
// ============================================================================
