use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::connector::adapter::{ChatClient, CompletionOptions};
use crate::domain::DomainError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Only the first choice's text is consumed; everything else is ignored.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
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

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// HTTP client for the OpenAI chat-completions API and compatible servers.
///
/// Configuration comes from the environment by default:
///
/// | Variable          | Default                  | Purpose                 |
/// |-------------------|--------------------------|-------------------------|
/// | `OPENAI_API_KEY`  | none                     | Bearer token (required) |
/// | `OPENAI_BASE_URL` | `https://api.openai.com` | Any compatible server   |
/// | `OPENAI_MODEL`    | `gpt-3.5-turbo`          | Chat model              |
///
/// A missing key is reported as [`DomainError::Auth`] on the first call,
/// without touching the network.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiChatClient {
    /// No request timeout is set; long completions are allowed to finish.
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            url,
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            Self::configured_api_key(),
            Self::configured_model(),
            Self::configured_base_url(),
        )
    }

    pub fn configured_api_key() -> Option<String> {
        std::env::var("OPENAI_API_KEY").ok()
    }

    pub fn configured_base_url() -> String {
        std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string())
    }

    pub fn configured_model() -> String {
        std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn error_message(status: u16, body: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {status}"))
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        options: &CompletionOptions,
    ) -> Result<String, DomainError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            DomainError::auth("OpenAiChatClient: no API key configured (set OPENAI_API_KEY)")
        })?;

        let request = ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: system,
                },
                ApiMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        debug!("OpenAiChatClient: POST {} model={}", self.url, self.model);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("OpenAiChatClient: request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiChatClient: API returned {status}: {body}");
            let message = Self::error_message(status.as_u16(), &body);
            return Err(match status.as_u16() {
                401 | 403 => DomainError::auth(format!("OpenAiChatClient: {message}")),
                code => DomainError::service(code, message),
            });
        }

        let body = response.text().await.map_err(|e| {
            DomainError::transport(format!("OpenAiChatClient: failed to read response: {e}"))
        })?;

        let api_response: ApiResponse = serde_json::from_str(&body).map_err(|e| {
            DomainError::malformed(format!("OpenAiChatClient: failed to parse response: {e}"))
        })?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::malformed("OpenAiChatClient: response has no message content"))
    }
}
