use async_trait::async_trait;
use serde_json::json;

use super::{role_messages, send_json, text_at, LlmProvider, Message};

/// Local model served by Ollama; no credentials.
pub struct OllamaProvider {
    url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(url: String, model: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> anyhow::Result<String> {
        let body = json!({
            "model": self.model,
            "messages": role_messages(system_prompt, messages),
            "stream": false,
            "format": "json",
            "options": { "temperature": 0.3 },
        });

        let request = self.client.post(format!("{}/api/chat", self.url));
        let data = send_json(request, &body, "Ollama").await?;

        text_at(&data, "/message/content", "Ollama")
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
