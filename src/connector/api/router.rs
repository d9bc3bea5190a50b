use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{GenerateController, PromptController};

pub struct Router<'a> {
    generate_controller: GenerateController<'a>,
    prompt_controller: PromptController,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            generate_controller: GenerateController::new(container),
            prompt_controller: PromptController::new(),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Generate {
                request,
                variations,
                format,
            } => {
                self.generate_controller
                    .generate(request, variations, format)
                    .await
            }
            Commands::Prompt { request } => self.prompt_controller.prompt(request),
        }
    }
}
