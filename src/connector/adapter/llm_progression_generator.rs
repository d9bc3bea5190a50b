use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::ProgressionGenerator;
use crate::connector::adapter::llm_reply::{extract_fenced_payload, parse_chord_array};
use crate::connector::adapter::{ChatClient, CompletionOptions};
use crate::domain::{Chord, DomainError, GenerationRequest, GenerationResult};

const SYSTEM_PROMPT: &str = "\
You are a music theory expert. You always return complete, valid JSON arrays \
and nothing else: no prose, no explanations.";

/// Favours variety over determinism; the token ceiling is generous so long
/// progressions are not truncated mid-array.
pub const COMPLETION_OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.7,
    max_tokens: 2000,
};

/// A [`ProgressionGenerator`] that asks a chat model for the chords.
///
/// The reply is validated strictly: it must parse as a complete JSON array
/// (after stripping a code fence, if any) and hold exactly the requested
/// number of chords. Tempo is never requested from the model; the caller's
/// value is echoed back.
pub struct LlmProgressionGenerator {
    chat_client: Arc<dyn ChatClient>,
}

impl LlmProgressionGenerator {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    /// Build the user prompt for a request.
    pub fn build_prompt(request: &GenerationRequest) -> String {
        let count = request.chord_count();
        format!(
            "Generate a {genre} chord progression in the key of {key} {scale} \
with exactly {count} chords.\n\
\n\
Return ONLY a JSON array with exactly {count} objects. Each object must have:\n\
- \"chord\": the chord name, root plus quality (e.g. \"Cmaj\", \"Dm\", \"G7\")\n\
- \"notes\": the chord tones with octave numbers (e.g. [\"C4\", \"E4\", \"G4\"])\n\
- \"duration\": the relative length as a string (e.g. \"1\")\n\
\n\
Example of the expected shape:\n\
[{{\"chord\": \"Cmaj\", \"notes\": [\"C4\", \"E4\", \"G4\"], \"duration\": \"1\"}}, \
{{\"chord\": \"Am\", \"notes\": [\"A3\", \"C4\", \"E4\"], \"duration\": \"1\"}}]\n\
\n\
The array must be complete and closed, and contain exactly {count} entries.",
            genre = request.normalized_genre(),
            key = request.key(),
            scale = request.normalized_scale(),
        )
    }

    fn into_result(
        request: &GenerationRequest,
        reply: &str,
    ) -> Result<GenerationResult, DomainError> {
        let payload = extract_fenced_payload(reply);
        let parsed = parse_chord_array(payload)?;

        let expected = request.chord_count() as usize;
        if parsed.len() != expected {
            return Err(DomainError::count_mismatch(expected, parsed.len()));
        }

        let chords: Vec<Chord> = parsed.into_iter().map(Chord::from).collect();
        Ok(GenerationResult::new(request.tempo(), chords))
    }
}

#[async_trait]
impl ProgressionGenerator for LlmProgressionGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, DomainError> {
        let prompt = Self::build_prompt(request);

        let reply = self
            .chat_client
            .complete(SYSTEM_PROMPT, &prompt, &COMPLETION_OPTIONS)
            .await
            .inspect_err(|e| warn!("LlmProgressionGenerator: completion failed: {e}"))?;

        debug!("LlmProgressionGenerator raw response: {reply}");

        Self::into_result(request, &reply)
            .inspect_err(|e| warn!("LlmProgressionGenerator: rejected model reply: {e}"))
    }

    fn backend_name(&self) -> &str {
        "llm"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Returns a canned reply and records what it was asked.
    struct ScriptedChatClient {
        reply: Result<String, fn() -> DomainError>,
        calls: Mutex<Vec<(String, String, CompletionOptions)>>,
    }

    impl ScriptedChatClient {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(err: fn() -> DomainError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(err),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedChatClient {
        async fn complete(
            &self,
            system: &str,
            user: &str,
            options: &CompletionOptions,
        ) -> Result<String, DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string(), *options));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn request(count: u32) -> GenerationRequest {
        GenerationRequest::new("C", "major", count, 96).unwrap()
    }

    #[tokio::test]
    async fn fenced_reply_maps_to_progression() {
        let client = ScriptedChatClient::replying(
            "```json\n[{\"chord\":\"Cmaj\",\"notes\":[\"C4\",\"E4\",\"G4\"],\"duration\":\"1\"}]\n```",
        );
        let generator = LlmProgressionGenerator::new(client.clone());

        let result = generator.generate(&request(1)).await.unwrap();

        assert_eq!(
            result,
            GenerationResult::new(
                96,
                vec![Chord::new("Cmaj", "1").with_notes(vec![
                    "C4".to_string(),
                    "E4".to_string(),
                    "G4".to_string()
                ])]
            )
        );
    }

    #[tokio::test]
    async fn chords_keep_model_order() {
        let client = ScriptedChatClient::replying(
            r#"[{"chord":"Dm7","notes":["D4","F4","A4"],"duration":"1"},
                {"chord":"G7","notes":["G3","B3","F4"],"duration":"1"},
                {"chord":"Cmaj7","notes":["C4","E4","B4"],"duration":"2"}]"#,
        );
        let generator = LlmProgressionGenerator::new(client);

        let result = generator.generate(&request(3)).await.unwrap();
        assert_eq!(result.chord_names(), "Dm7 - G7 - Cmaj7");
        assert!(result.chords.iter().all(|c| c.has_notes()));
    }

    #[tokio::test]
    async fn truncated_reply_is_malformed() {
        let client = ScriptedChatClient::replying(
            r#"[{"chord":"Cmaj","notes":["C4","E4","G4"],"duration":"1"},{"chord":"Am","no"#,
        );
        let generator = LlmProgressionGenerator::new(client);

        let err = generator.generate(&request(2)).await.unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn short_array_is_count_mismatch() {
        let client = ScriptedChatClient::replying(
            r#"[{"chord":"C","notes":["C4"],"duration":"1"},
                {"chord":"F","notes":["F4"],"duration":"1"},
                {"chord":"G","notes":["G4"],"duration":"1"}]"#,
        );
        let generator = LlmProgressionGenerator::new(client);

        let err = generator.generate(&request(4)).await.unwrap_err();
        match err {
            DomainError::CountMismatch { expected, actual } => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("expected CountMismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn chat_errors_propagate_unchanged() {
        let client = ScriptedChatClient::failing(|| DomainError::auth("rejected"));
        let generator = LlmProgressionGenerator::new(client);

        let err = generator.generate(&request(2)).await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn sends_fixed_system_prompt_and_options() {
        let client = ScriptedChatClient::replying(
            r#"[{"chord":"Am","notes":["A3","C4","E4"],"duration":"1"}]"#,
        );
        let generator = LlmProgressionGenerator::new(client.clone());

        generator.generate(&request(1)).await.unwrap();

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (system, user, options) = &calls[0];
        assert!(system.contains("music theory expert"));
        assert!(user.contains("exactly 1 chords"));
        assert_eq!(options.temperature, 0.7);
        assert_eq!(options.max_tokens, 2000);
    }

    #[test]
    fn prompt_embeds_request_fields() {
        let request = GenerationRequest::new("Eb", "minor", 6, 140)
            .unwrap()
            .with_genre("funk");
        let prompt = LlmProgressionGenerator::build_prompt(&request);

        assert!(prompt.contains("funk chord progression"));
        assert!(prompt.contains("key of Eb minor"));
        assert!(prompt.contains("exactly 6 objects"));
        assert!(prompt.contains("\"chord\": \"Cmaj\""));
        assert!(!prompt.contains("140"));
    }

    #[test]
    fn prompt_lowercases_scale_and_genre() {
        let request = GenerationRequest::new("A", "Minor", 4, 100)
            .unwrap()
            .with_genre("Bossa Nova");
        let prompt = LlmProgressionGenerator::build_prompt(&request);
        let first_line = prompt.lines().next().unwrap();

        assert_eq!(
            first_line,
            "Generate a bossa nova chord progression in the key of A minor with exactly 4 chords."
        );
        assert!(!prompt.contains("Minor"));
        assert!(!prompt.contains("Bossa Nova"));
    }

    #[test]
    fn prompt_uses_default_genre() {
        let prompt = LlmProgressionGenerator::build_prompt(&request(4));
        assert!(prompt.contains("jazz chord progression"));
    }
}
