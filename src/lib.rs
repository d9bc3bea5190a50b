pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{GenerateProgressionUseCase, ProgressionGenerator, MAX_VARIATIONS};

pub use cli::{Backend, Commands, OutputFormat, RequestArgs};

pub use connector::{
    extract_fenced_payload, parse_chord_array, ChatClient, CompletionOptions, LlmChord,
    LlmProgressionGenerator, LocalServiceGenerator, OpenAiChatClient, COMPLETION_OPTIONS,
    DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, DEFAULT_SERVICE_URL,
};

pub use domain::{
    Chord, DomainError, GenerationRequest, GenerationResult, MidiNote, DEFAULT_GENRE,
};
