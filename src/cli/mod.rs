use clap::{Args, Subcommand, ValueEnum};

use crate::domain::{DomainError, GenerationRequest};

/// Which generation backend this run talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// The chord-generation web service
    Local,
    /// An OpenAI-compatible chat-completion API
    Llm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// Tonic of the progression, e.g. C or F#
    #[arg(short, long)]
    pub key: String,

    /// Scale or mode, e.g. major or minor (case-insensitive)
    #[arg(short, long, default_value = "major")]
    pub scale: String,

    /// Number of chords to generate
    #[arg(short, long, default_value = "4")]
    pub chords: u32,

    /// Tempo in beats per minute
    #[arg(short, long, default_value = "120")]
    pub bpm: u32,

    /// Style hint; defaults to jazz
    #[arg(short, long)]
    pub genre: Option<String>,
}

impl RequestArgs {
    pub fn into_request(self) -> Result<GenerationRequest, DomainError> {
        let request = GenerationRequest::new(self.key, self.scale, self.chords, self.bpm)?;
        Ok(match self.genre {
            Some(genre) => request.with_genre(genre),
            None => request,
        })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a chord progression with the configured backend
    Generate {
        #[command(flatten)]
        request: RequestArgs,

        /// Generate several independent progressions concurrently (at most 8)
        #[arg(long, default_value = "1")]
        variations: usize,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the prompt the LLM backend would send for a request
    Prompt {
        #[command(flatten)]
        request: RequestArgs,
    },
}
