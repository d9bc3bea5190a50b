use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ProgressionGenerator;
use crate::connector::adapter::llm_reply::duration_as_string;
use crate::domain::{Chord, DomainError, GenerationRequest, GenerationResult, MidiNote};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:3000";
const GENERATE_PATH: &str = "/generate";

/// Request body of `POST /generate`. The service requires lower-case
/// scale and genre values.
#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    key: &'a str,
    scale: String,
    chords: u32,
    bpm: u32,
    genre: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    bpm: u32,
    chords: Vec<ChordData>,
    #[serde(default)]
    midi: Vec<MidiNote>,
}

#[derive(Deserialize)]
struct ChordData {
    name: String,
    #[serde(deserialize_with = "duration_as_string")]
    duration: String,
    #[serde(default)]
    notes: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// A [`ProgressionGenerator`] backed by the chord-generation web service.
///
/// The service's success payload is trusted as-is; the only validation is
/// that it deserializes. No retries are attempted.
pub struct LocalServiceGenerator {
    client: reqwest::Client,
    /// Full endpoint URL (base + GENERATE_PATH).
    url: String,
}

impl LocalServiceGenerator {
    /// No request timeout is set; callers that need one wrap `generate`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            url: format!("{}{}", base.trim_end_matches('/'), GENERATE_PATH),
        }
    }

    /// Reads `CHORDGEN_SERVICE_URL`, defaulting to `http://localhost:3000`.
    pub fn from_env() -> Self {
        Self::new(Self::configured_base_url())
    }

    pub fn configured_base_url() -> String {
        std::env::var("CHORDGEN_SERVICE_URL").unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Message for a failed response: the body's `error` field, or one
    /// synthesized from the status code.
    fn error_message(status: u16, body: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {status}"))
    }
}

#[async_trait]
impl ProgressionGenerator for LocalServiceGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, DomainError> {
        let body = GenerateBody {
            key: request.key(),
            scale: request.normalized_scale(),
            chords: request.chord_count(),
            bpm: request.tempo(),
            genre: request.normalized_genre(),
        };

        debug!("LocalServiceGenerator: POST {} {:?}", self.url, body);

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("LocalServiceGenerator: request to {} failed: {e}", self.url);
                DomainError::transport(format!("LocalServiceGenerator: request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("LocalServiceGenerator: service returned {status}: {text}");
            return Err(DomainError::service(
                status.as_u16(),
                Self::error_message(status.as_u16(), &text),
            ));
        }

        let text = response.text().await.map_err(|e| {
            DomainError::transport(format!("LocalServiceGenerator: failed to read response: {e}"))
        })?;

        let parsed: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
            warn!("LocalServiceGenerator: unexpected response body: {text}");
            DomainError::malformed(format!("LocalServiceGenerator: failed to parse response: {e}"))
        })?;

        let chords = parsed
            .chords
            .into_iter()
            .map(|c| Chord {
                name: c.name,
                notes: c.notes,
                duration: c.duration,
            })
            .collect();

        Ok(GenerationResult::new(parsed.bpm, chords).with_midi(parsed.midi))
    }

    fn backend_name(&self) -> &str {
        "local"
    }
}
