//! Hosted text-completion client (OpenAI-compatible chat API) and the
//! best-effort JSON recovery applied to its output.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::data::fetch::{build_http_client, AttemptFailure, RetryPolicy};
use crate::error::AdvisorError;

pub const DEFAULT_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";
const COMPLETION_TIMEOUT_SECS: u64 = 60;

pub trait CompletionClient {
    fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, AdvisorError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatCompletionClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    retry: RetryPolicy,
}

impl ChatCompletionClient {
    pub fn new(
        url: &str,
        api_key: &str,
        model: &str,
        insecure_tls: bool,
    ) -> Result<Self, AdvisorError> {
        Ok(Self {
            client: build_http_client(Duration::from_secs(COMPLETION_TIMEOUT_SECS), insecure_tls)?,
            url: url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    fn post_once(&self, request: &ChatRequest<'_>) -> Result<String, AttemptFailure> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .map_err(|e| AttemptFailure::from_transport(&e))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AttemptFailure::from_transport(&e))?;
        if !status.is_success() {
            return Err(AttemptFailure::from_status(status, &body));
        }
        Ok(body)
    }
}

impl CompletionClient for ChatCompletionClient {
    fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, AdvisorError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_text,
                },
            ],
        };
        tracing::debug!(model = %self.model, "requesting intent completion");
        let body = self.retry.run("chat completion", || self.post_once(&request))?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| AdvisorError::upstream("chat completion", format!("unexpected body: {e}")))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AdvisorError::upstream("chat completion", "no choices in response"))
    }
}

/// Parse `content` as JSON, or else the first balanced `{...}` inside it.
pub fn extract_json_object(content: &str) -> Option<serde_json::Value> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(content.trim()) {
        if value.is_object() {
            return Some(value);
        }
    }
    let candidate = first_balanced_object(content)?;
    serde_json::from_str(candidate).ok()
}

fn first_balanced_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in content[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&content[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
