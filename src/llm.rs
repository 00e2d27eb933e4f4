use async_openai::types::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::options::GenerationOptions;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, warn};

use crate::{LLMClient, LLMParams, TARGET_LLM_REQUEST};

const LLM_TIMEOUT: Duration = Duration::from_secs(120);

const SYSTEM_MESSAGE: &str =
    "You are an AI assistant that analyzes news articles and creates event timelines. \
     Always respond with valid JSON when asked for JSON.";

/// Send a prompt to the configured LLM backend and return the raw response
/// text. One attempt with a hard timeout; the caller owns the fallback when
/// this returns None.
pub async fn generate_llm_response(prompt: &str, params: &LLMParams) -> Option<String> {
    debug!(target: TARGET_LLM_REQUEST, "Sending prompt to {} ({} chars)", model_label(params), prompt.len());

    let response = match &params.llm_client {
        LLMClient::Ollama(ollama) => {
            let mut request = GenerationRequest::new(params.model.clone(), prompt.to_string());
            request.options =
                Some(GenerationOptions::default().temperature(params.temperature));

            match timeout(LLM_TIMEOUT, ollama.generate(request)).await {
                Ok(Ok(response)) => Some(response.response),
                Ok(Err(e)) => {
                    warn!(target: TARGET_LLM_REQUEST, "Ollama request failed: {}", e);
                    None
                }
                Err(_) => {
                    warn!(target: TARGET_LLM_REQUEST, "Ollama request timed out after {:?}", LLM_TIMEOUT);
                    None
                }
            }
        }
        LLMClient::OpenAI(client) => {
            let request = match build_openai_request(prompt, params) {
                Ok(request) => request,
                Err(e) => {
                    error!(target: TARGET_LLM_REQUEST, "Failed to build OpenAI request: {}", e);
                    return None;
                }
            };

            match timeout(LLM_TIMEOUT, client.chat().create(request)).await {
                Ok(Ok(response)) => response
                    .choices
                    .first()
                    .and_then(|choice| choice.message.content.clone()),
                Ok(Err(e)) => {
                    warn!(target: TARGET_LLM_REQUEST, "OpenAI request failed: {}", e);
                    None
                }
                Err(_) => {
                    warn!(target: TARGET_LLM_REQUEST, "OpenAI request timed out after {:?}", LLM_TIMEOUT);
                    None
                }
            }
        }
    };

    match response {
        Some(text) if !text.trim().is_empty() => {
            debug!(target: TARGET_LLM_REQUEST, "Received {} chars from {}", text.len(), model_label(params));
            Some(text)
        }
        Some(_) => {
            warn!(target: TARGET_LLM_REQUEST, "Empty response from {}", model_label(params));
            None
        }
        None => None,
    }
}

fn build_openai_request(
    prompt: &str,
    params: &LLMParams,
) -> anyhow::Result<async_openai::types::CreateChatCompletionRequest> {
    let request = CreateChatCompletionRequestArgs::default()
        .model(&params.model)
        .temperature(params.temperature)
        .messages([
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_MESSAGE)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        ])
        .build()?;
    Ok(request)
}

fn model_label(params: &LLMParams) -> String {
    match &params.llm_client {
        LLMClient::Ollama(_) => format!("ollama/{}", params.model),
        LLMClient::OpenAI(_) => format!("openai/{}", params.model),
    }
}
