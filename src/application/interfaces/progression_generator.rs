use async_trait::async_trait;

use crate::domain::{DomainError, GenerationRequest, GenerationResult};

/// Produces a chord progression for a request.
///
/// One implementation is chosen per deployment (local service or LLM); there
/// is no fallback between them. Implementations keep no state between calls,
/// so concurrent `generate` calls are independent.
#[async_trait]
pub trait ProgressionGenerator: Send + Sync {
    /// Perform exactly one outbound exchange and return the normalized
    /// progression, or the first error encountered.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, DomainError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &str;
}
