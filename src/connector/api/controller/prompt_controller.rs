use anyhow::Result;

use crate::cli::RequestArgs;
use crate::LlmProgressionGenerator;

/// Shows the prompt the LLM backend would send, without calling any backend.
pub struct PromptController;

impl PromptController {
    pub fn new() -> Self {
        Self
    }

    pub fn prompt(&self, args: RequestArgs) -> Result<String> {
        let request = args.into_request()?;
        Ok(LlmProgressionGenerator::build_prompt(&request))
    }
}

impl Default for PromptController {
    fn default() -> Self {
        Self::new()
    }
}
