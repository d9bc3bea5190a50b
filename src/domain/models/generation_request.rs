use crate::domain::DomainError;

pub const DEFAULT_GENRE: &str = "jazz";

/// Parameters for one chord-progression generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    key: String,
    scale: String,
    chord_count: u32,
    tempo: u32,
    genre: Option<String>,
}

impl GenerationRequest {
    /// Build a request, rejecting an empty key or scale and a zero chord
    /// count or tempo.
    pub fn new(
        key: impl Into<String>,
        scale: impl Into<String>,
        chord_count: u32,
        tempo: u32,
    ) -> Result<Self, DomainError> {
        let key: String = key.into().trim().to_string();
        let scale: String = scale.into().trim().to_string();

        if key.is_empty() {
            return Err(DomainError::invalid_input("key must not be empty"));
        }
        if scale.is_empty() {
            return Err(DomainError::invalid_input("scale must not be empty"));
        }
        if chord_count == 0 {
            return Err(DomainError::invalid_input("chord count must be positive"));
        }
        if tempo == 0 {
            return Err(DomainError::invalid_input("tempo must be positive"));
        }

        Ok(Self {
            key,
            scale,
            chord_count,
            tempo,
            genre: None,
        })
    }

    /// Blank genres are ignored so the default applies.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        let genre: String = genre.into().trim().to_string();
        self.genre = if genre.is_empty() { None } else { Some(genre) };
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Scale as supplied by the caller.
    pub fn scale(&self) -> &str {
        &self.scale
    }

    pub fn normalized_scale(&self) -> String {
        self.scale.to_lowercase()
    }

    pub fn chord_count(&self) -> u32 {
        self.chord_count
    }

    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    /// Genre as supplied, or [`DEFAULT_GENRE`].
    pub fn genre(&self) -> &str {
        self.genre.as_deref().unwrap_or(DEFAULT_GENRE)
    }

    pub fn normalized_genre(&self) -> String {
        self.genre().to_lowercase()
    }

    pub fn summary(&self) -> String {
        format!(
            "key={} scale={} chords={} bpm={} genre={}",
            self.key,
            self.scale,
            self.chord_count,
            self.tempo,
            self.genre()
        )
    }
}
