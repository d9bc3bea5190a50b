use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::cli::Backend;
use crate::{
    GenerateProgressionUseCase, LlmProgressionGenerator, LocalServiceGenerator,
    OpenAiChatClient, ProgressionGenerator,
};

/// Settings resolved from the command line. Unset values fall back to the
/// environment, then to built-in defaults.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    pub backend: Backend,
    pub service_url: Option<String>,
    pub llm_base_url: Option<String>,
    pub llm_model: Option<String>,
    pub api_key: Option<String>,
}

impl ContainerConfig {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            service_url: None,
            llm_base_url: None,
            llm_model: None,
            api_key: None,
        }
    }

    fn has_llm_overrides(&self) -> bool {
        self.llm_base_url.is_some() || self.llm_model.is_some() || self.api_key.is_some()
    }
}

pub struct Container {
    generator: Arc<dyn ProgressionGenerator>,
    config: ContainerConfig,
}

impl Container {
    /// Select the generation backend once; it stays fixed for the lifetime
    /// of the container.
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let generator: Arc<dyn ProgressionGenerator> = match config.backend {
            Backend::Local => {
                let service = match config.service_url.as_deref() {
                    Some(url) => LocalServiceGenerator::new(url),
                    None => LocalServiceGenerator::from_env(),
                };
                debug!("Using local generation service at {}", service.url());
                Arc::new(service)
            }
            Backend::Llm => {
                let chat_client = if config.has_llm_overrides() {
                    OpenAiChatClient::new(
                        config
                            .api_key
                            .clone()
                            .or_else(OpenAiChatClient::configured_api_key),
                        config
                            .llm_model
                            .clone()
                            .unwrap_or_else(OpenAiChatClient::configured_model),
                        config
                            .llm_base_url
                            .clone()
                            .unwrap_or_else(OpenAiChatClient::configured_base_url),
                    )
                } else {
                    OpenAiChatClient::from_env()
                };
                debug!(
                    "Using LLM generation via {} (model {})",
                    chat_client.url(),
                    chat_client.model()
                );
                Arc::new(LlmProgressionGenerator::new(Arc::new(chat_client)))
            }
        };

        Ok(Self { generator, config })
    }

    pub fn generate_use_case(&self) -> GenerateProgressionUseCase {
        GenerateProgressionUseCase::new(self.generator.clone())
    }

    pub fn backend(&self) -> Backend {
        self.config.backend
    }
}
