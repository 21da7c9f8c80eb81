mod mock_llm_client;
mod ollama_client;

pub use mock_llm_client::MockLlmClient;
pub use ollama_client::OllamaClient;
