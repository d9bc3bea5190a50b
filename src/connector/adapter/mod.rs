mod chat_client;
mod llm_progression_generator;
mod llm_reply;
mod local_service_generator;
mod openai_chat_client;

pub use chat_client::*;
pub use llm_progression_generator::*;
pub use llm_reply::*;
pub use local_service_generator::*;
pub use openai_chat_client::*;
