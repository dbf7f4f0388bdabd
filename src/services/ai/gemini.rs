use async_trait::async_trait;
use serde_json::json;

use super::{send_json, text_at, LlmProvider, Message};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> anyhow::Result<String> {
        // Gemini calls the assistant role "model".
        let contents: Vec<serde_json::Value> = messages
            .iter()
            .map(|msg| {
                let role = if msg.role == "assistant" { "model" } else { "user" };
                json!({
                    "role": role,
                    "parts": [{ "text": msg.content }],
                })
            })
            .collect();

        let body = json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": contents,
            "generationConfig": {
                "temperature": 0.3,
                "responseMimeType": "application/json",
            },
        });

        let request = self
            .client
            .post(format!("{GEMINI_API_BASE}/models/{}:generateContent", self.model))
            .query(&[("key", self.api_key.as_str())]);
        let data = send_json(request, &body, "Gemini").await?;

        text_at(&data, "/candidates/0/content/parts/0/text", "Gemini")
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
