pub mod analyzer;
pub mod config;
pub mod credibility;
pub mod entity;
pub mod fetcher;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod processor;
pub mod prompts;
pub mod report;
pub mod timeline;

use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use ollama_rs::Ollama;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_LLM_REQUEST: &str = "llm_request";

#[derive(Clone, Debug)]
pub enum LLMClient {
    Ollama(Ollama),
    OpenAI(OpenAIClient<OpenAIConfig>),
}

#[derive(Clone)]
pub struct LLMParams {
    pub llm_client: LLMClient,
    pub model: String,
    pub temperature: f32,
}
