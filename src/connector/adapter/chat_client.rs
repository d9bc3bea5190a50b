use async_trait::async_trait;

use crate::domain::DomainError;

/// Sampling parameters forwarded with a chat completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// One-shot chat completion: a system instruction and a user prompt in, the
/// model's reply text out.
///
/// [`super::LlmProgressionGenerator`] only sees this trait, so its prompt and
/// reply validation can be exercised with a scripted client in tests.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Errors keep their kind: missing or rejected credentials are
    /// [`DomainError::Auth`], unreachable hosts [`DomainError::Transport`].
    async fn complete(
        &self,
        system: &str,
        user: &str,
        options: &CompletionOptions,
    ) -> Result<String, DomainError>;
}
