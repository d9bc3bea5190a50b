use serde::{Deserialize, Serialize};

/// One chord of a progression.
///
/// `notes` is populated by backends that voice their chords (the LLM backend
/// always does); the local service only names them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
    pub duration: String,
}

impl Chord {
    pub fn new(name: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: None,
            duration: duration.into(),
        }
    }

    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn notes(&self) -> Option<&[String]> {
        self.notes.as_deref()
    }

    pub fn has_notes(&self) -> bool {
        self.notes.as_ref().is_some_and(|n| !n.is_empty())
    }
}

/// A single note event returned by the local service next to its chords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidiNote {
    pub note: String,
    pub duration: String,
    pub velocity: u8,
}
