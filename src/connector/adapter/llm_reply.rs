//! Pure helpers for turning a model's free-text reply into chord data.

use serde::{Deserialize, Deserializer};

use crate::domain::{Chord, DomainError};

const FENCE: &str = "```";

/// One element of the array the model is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LlmChord {
    pub chord: String,
    pub notes: Vec<String>,
    #[serde(deserialize_with = "duration_as_string")]
    pub duration: String,
}

impl From<LlmChord> for Chord {
    fn from(value: LlmChord) -> Self {
        Chord::new(value.chord, value.duration).with_notes(value.notes)
    }
}

/// Accepts `"duration": 1` as well as `"1"`; both backends emit either form.
pub(crate) fn duration_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Return the interior of the first fenced code block (an optional `json`
/// tag after the opening fence is dropped). Replies without a complete
/// fence are returned unchanged.
pub fn extract_fenced_payload(reply: &str) -> &str {
    let Some(open) = reply.find(FENCE) else {
        return reply;
    };

    let mut body = &reply[open + FENCE.len()..];
    if body
        .get(..4)
        .is_some_and(|tag| tag.eq_ignore_ascii_case("json"))
    {
        body = &body[4..];
    }

    match body.find(FENCE) {
        Some(close) => body[..close].trim(),
        None => reply,
    }
}

/// Parse the payload as a complete JSON array of chords.
///
/// A reply cut short by the output-length limit fails here rather than
/// yielding a partial progression.
pub fn parse_chord_array(payload: &str) -> Result<Vec<LlmChord>, DomainError> {
    serde_json::from_str::<Vec<LlmChord>>(payload).map_err(|e| {
        DomainError::malformed(format!(
            "model reply is not a complete chord array ({e}): {}",
            preview(payload)
        ))
    })
}

fn preview(payload: &str) -> String {
    const LIMIT: usize = 200;
    let trimmed = payload.trim();
    match trimmed.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
