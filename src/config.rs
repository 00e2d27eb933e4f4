use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use ollama_rs::Ollama;

use crate::{LLMClient, LLMParams};

pub const DEFAULT_MAX_ARTICLES: usize = 10;
pub const DEFAULT_DAYS_BACK: i64 = 30;
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_CACHE_DIR: &str = "data/cache";

/// Default Jaro-Winkler similarity above which two same-day milestone
/// descriptions are treated as the same event.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.82;

/// Default number of distinct corroborating sources needed to flag a
/// milestone as major.
pub const DEFAULT_MAJOR_SOURCE_COUNT: usize = 3;

/// Sources considered reputable for credibility scoring. Overridable with
/// the REPUTABLE_SOURCES environment variable (semicolon-delimited).
pub const REPUTABLE_SOURCES: &[&str] = &[
    "bbc",
    "reuters",
    "ap news",
    "associated press",
    "the new york times",
    "the washington post",
    "the guardian",
    "cnn",
    "npr",
    "pbs",
    "al jazeera",
    "bloomberg",
    "wall street journal",
    "forbes",
    "time",
    "newsweek",
];

/// Which LLM backend the analyzer and entity extractor talk to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LlmBackend {
    Ollama,
    OpenAI,
    None,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub news_api_key: Option<String>,
    pub llm_backend: LlmBackend,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub ollama_host: String,
    pub ollama_port: u16,
    pub ollama_model: String,
    pub temperature: f32,
    pub max_articles: usize,
    pub days_back: i64,
    pub language: String,
    pub cache_enabled: bool,
    pub cache_dir: PathBuf,
    pub similarity_threshold: f64,
    pub major_source_count: usize,
    pub reputable_sources: Vec<String>,
}

/// Retrieves an environment variable and splits it into a vector of strings
/// based on a delimiter. Empty variables yield an empty vector.
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Vec<String> {
    env::var(var)
        .unwrap_or_default()
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Assemble configuration from environment variables. Fails only on
    /// configuration errors that make a pipeline run impossible: a selected
    /// LLM backend with no credentials.
    pub fn from_env() -> Result<Self> {
        let news_api_key = env::var("NEWSAPI_KEY").ok().filter(|k| !k.is_empty());

        let backend_name = env::var("LLM_BACKEND").unwrap_or_else(|_| "ollama".to_string());
        let llm_backend = match backend_name.to_lowercase().as_str() {
            "ollama" => LlmBackend::Ollama,
            "openai" => LlmBackend::OpenAI,
            "none" => LlmBackend::None,
            other => {
                return Err(anyhow!(
                    "Unknown LLM_BACKEND '{}': expected 'ollama', 'openai', or 'none'",
                    other
                ))
            }
        };

        let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        if llm_backend == LlmBackend::OpenAI && openai_api_key.is_none() {
            return Err(anyhow!(
                "LLM_BACKEND is 'openai' but OPENAI_API_KEY is not set"
            ));
        }

        let ollama_port: u16 = env::var("OLLAMA_PORT")
            .unwrap_or_else(|_| "11434".to_string())
            .parse()
            .unwrap_or(11434);

        let temperature: f32 = env::var("LLM_TEMPERATURE")
            .unwrap_or_else(|_| "0.3".to_string())
            .parse()
            .unwrap_or(0.3);

        let max_articles: usize = env::var("MAX_ARTICLES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_ARTICLES);

        let days_back: i64 = env::var("DAYS_BACK")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DAYS_BACK);

        let cache_enabled = env::var("CACHE_ARTICLES")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let similarity_threshold: f64 = env::var("DEDUP_SIMILARITY_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SIMILARITY_THRESHOLD);

        let major_source_count: usize = env::var("MAJOR_SOURCE_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAJOR_SOURCE_COUNT);

        let mut reputable_sources = get_env_var_as_vec("REPUTABLE_SOURCES", ';');
        if reputable_sources.is_empty() {
            reputable_sources = REPUTABLE_SOURCES.iter().map(|s| s.to_string()).collect();
        }

        Ok(Config {
            news_api_key,
            llm_backend,
            openai_api_key,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            ollama_host: env::var("OLLAMA_HOST").unwrap_or_else(|_| "localhost".to_string()),
            ollama_port,
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.1".to_string()),
            temperature,
            max_articles,
            days_back,
            language: env::var("RESULT_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
            cache_enabled,
            cache_dir: PathBuf::from(
                env::var("CACHE_DIR").unwrap_or_else(|_| DEFAULT_CACHE_DIR.to_string()),
            ),
            similarity_threshold,
            major_source_count,
            reputable_sources,
        })
    }

    /// Build the LLM parameters for the configured backend, or None when the
    /// pipeline should run in degraded (non-AI) mode.
    pub fn llm_params(&self) -> Option<LLMParams> {
        match self.llm_backend {
            LlmBackend::Ollama => Some(LLMParams {
                llm_client: LLMClient::Ollama(Ollama::new(
                    self.ollama_host.clone(),
                    self.ollama_port,
                )),
                model: self.ollama_model.clone(),
                temperature: self.temperature,
            }),
            LlmBackend::OpenAI => {
                let key = self.openai_api_key.clone()?;
                let openai_config = OpenAIConfig::new().with_api_key(key);
                Some(LLMParams {
                    llm_client: LLMClient::OpenAI(OpenAIClient::with_config(openai_config)),
                    model: self.openai_model.clone(),
                    temperature: self.temperature,
                })
            }
            LlmBackend::None => None,
        }
    }
}
