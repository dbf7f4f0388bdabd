pub mod gemini;
pub mod ollama;
pub mod openai;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> anyhow::Result<String>;

    fn name(&self) -> &'static str;
}

/// Role/content list with the system prompt in front, as the OpenAI and
/// Ollama chat endpoints expect it.
fn role_messages(system_prompt: &str, messages: &[Message]) -> Vec<Value> {
    std::iter::once(json!({ "role": "system", "content": system_prompt }))
        .chain(
            messages
                .iter()
                .map(|msg| json!({ "role": msg.role, "content": msg.content })),
        )
        .collect()
}

/// Sends a JSON request and returns the decoded body of a 2xx answer.
async fn send_json(
    request: reqwest::RequestBuilder,
    body: &Value,
    provider: &str,
) -> anyhow::Result<Value> {
    let resp = request
        .json(body)
        .send()
        .await
        .with_context(|| format!("failed to call {provider} API"))?;

    let status = resp.status();
    let data: Value = resp
        .json()
        .await
        .with_context(|| format!("failed to parse {provider} response"))?;

    if !status.is_success() {
        anyhow::bail!("{provider} API error ({status}): {data}");
    }
    Ok(data)
}

/// Text at a JSON pointer such as `/choices/0/message/content`.
fn text_at(data: &Value, pointer: &str, provider: &str) -> anyhow::Result<String> {
    data.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("{provider} response has no text at {pointer}"))
}
