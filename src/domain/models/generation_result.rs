use serde::{Deserialize, Serialize};

use super::{Chord, MidiNote};

/// A generated progression. Chords are in performance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub tempo: u32,
    pub chords: Vec<Chord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub midi: Vec<MidiNote>,
}

impl GenerationResult {
    pub fn new(tempo: u32, chords: Vec<Chord>) -> Self {
        Self {
            tempo,
            chords,
            midi: Vec::new(),
        }
    }

    pub fn with_midi(mut self, midi: Vec<MidiNote>) -> Self {
        self.midi = midi;
        self
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Chord names joined in order, e.g. `Cmaj - Am - Dm - G7`.
    pub fn chord_names(&self) -> String {
        self.chords
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(" - ")
    }
}
