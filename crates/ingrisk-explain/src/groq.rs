//! HTTP client for Groq's OpenAI-compatible chat-completions API.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable holding the Groq API key.
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RETRIES: u32 = 2;

#[derive(Error, Debug)]
pub enum ExplainerInitError {
    #[error("GROQ_API_KEY not found in environment")]
    MissingApiKey,
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("response contained no message content")]
    MissingContent,
}

impl GenerateError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Server { status, .. } => *status >= 500 || *status == 429,
            Self::MissingContent => false,
        }
    }
}

/// Client for single prompt-and-response round trips to Groq.
///
/// Requests are bounded by a 30-second timeout and retried at most twice on
/// transport faults and retryable statuses.
#[derive(Debug)]
pub struct GroqClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqClient {
    /// Build a client from `GROQ_API_KEY`.
    ///
    /// A missing key fails here, at construction time, so callers can
    /// degrade the explanation feature instead of discovering the problem
    /// mid-request.
    pub fn from_env() -> Result<Self, ExplainerInitError> {
        let api_key =
            std::env::var(GROQ_API_KEY_VAR).map_err(|_| ExplainerInitError::MissingApiKey)?;
        Self::new(api_key)
    }

    pub fn new(api_key: String) -> Result<Self, ExplainerInitError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        info!(model = DEFAULT_MODEL, "Groq client initialized");
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Point the client at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Send one prompt and return the generated text.
    pub async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, GenerateError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        let mut attempt = 0;
        loop {
            match self.request(&url, &body).await {
                Ok(content) => return Ok(content),
                Err(err) if attempt < MAX_RETRIES && err.is_retryable() => {
                    attempt += 1;
                    warn!(attempt, error = %err, "Groq request failed, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn request(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<String, GenerateError> {
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerateError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = resp.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or(GenerateError::MissingContent)
    }
}
