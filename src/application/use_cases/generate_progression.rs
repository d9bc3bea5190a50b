use std::sync::Arc;
use std::time::Instant;

use futures_util::future::try_join_all;
use tracing::{error, info};

use crate::application::ProgressionGenerator;
use crate::domain::{DomainError, GenerationRequest, GenerationResult};

/// Upper bound on concurrent generations per batch.
pub const MAX_VARIATIONS: usize = 8;

pub struct GenerateProgressionUseCase {
    generator: Arc<dyn ProgressionGenerator>,
}

impl GenerateProgressionUseCase {
    pub fn new(generator: Arc<dyn ProgressionGenerator>) -> Self {
        Self { generator }
    }

    pub fn backend_name(&self) -> &str {
        self.generator.backend_name()
    }

    pub async fn execute(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, DomainError> {
        info!(
            "Generating progression via {}: {}",
            self.generator.backend_name(),
            request.summary()
        );

        let start_time = Instant::now();

        match self.generator.generate(request).await {
            Ok(result) => {
                info!(
                    "Generated {} chords in {:.2}s",
                    result.len(),
                    start_time.elapsed().as_secs_f64()
                );
                Ok(result)
            }
            Err(e) => {
                error!("Generation via {} failed: {e}", self.generator.backend_name());
                Err(e)
            }
        }
    }

    /// Run `variations` independent generations concurrently (at most
    /// [`MAX_VARIATIONS`]). Results come back in call order; the first
    /// failure fails the batch.
    pub async fn execute_many(
        &self,
        request: &GenerationRequest,
        variations: usize,
    ) -> Result<Vec<GenerationResult>, DomainError> {
        if variations == 0 {
            return Err(DomainError::invalid_input(
                "number of variations must be positive",
            ));
        }
        if variations > MAX_VARIATIONS {
            return Err(DomainError::invalid_input(format!(
                "at most {MAX_VARIATIONS} variations per run, got {variations}"
            )));
        }

        try_join_all((0..variations).map(|_| self.execute(request))).await
    }
}
