mod chat_completions_client;
mod llm_client_factory;

pub use chat_completions_client::{ChatCompletionsClient, create_chat_completions_client};
pub use llm_client_factory::LlmClientFactory;
