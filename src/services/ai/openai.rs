use async_trait::async_trait;
use serde_json::json;

use super::{role_messages, send_json, text_at, LlmProvider, Message};

/// Any OpenAI-compatible chat completions endpoint, selected by `base_url`.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> anyhow::Result<String> {
        let body = json!({
            "model": self.model,
            "messages": role_messages(system_prompt, messages),
            "temperature": 0.3,
            "response_format": { "type": "json_object" },
        });

        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key);
        let data = send_json(request, &body, "OpenAI").await?;

        text_at(&data, "/choices/0/message/content", "OpenAI")
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
