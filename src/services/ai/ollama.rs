use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::{LlmProvider, Message};

pub struct OllamaProvider {
    url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(url: String, model: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build Ollama HTTP client")?;
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            model,
            client,
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> anyhow::Result<String> {
        let mut ollama_messages = vec![json!({
            "role": "system",
            "content": system_prompt,
        })];

        for msg in messages {
            ollama_messages.push(json!({
                "role": msg.role,
                "content": msg.content,
            }));
        }

        let body = json!({
            "model": self.model,
            "messages": ollama_messages,
            "stream": false,
            "format": "json",
        });

        let resp = self
            .client
            .post(format!("{}/api/chat", self.url))
            .json(&body)
            .send()
            .await
            .context("failed to call Ollama API")?
            .error_for_status()
            .context("Ollama API returned error")?;

        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse Ollama response")?;

        data["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing content in Ollama response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn user(content: &str) -> Vec<Message> {
        vec![Message {
            role: "user".to_string(),
            content: content.to_string(),
        }]
    }

    #[tokio::test]
    async fn test_returns_message_content() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(200).json_body(serde_json::json!({
                    "message": {"role": "assistant", "content": "hello"}
                }));
            })
            .await;

        let provider =
            OllamaProvider::new(server.base_url(), "llama3.2".to_string(), Duration::from_secs(5))
                .unwrap();
        assert_eq!(provider.chat("system", &user("hi")).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_server_error_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(500);
            })
            .await;

        let provider =
            OllamaProvider::new(server.base_url(), "llama3.2".to_string(), Duration::from_secs(5))
                .unwrap();
        assert!(provider.chat("system", &user("hi")).await.is_err());
    }

    #[tokio::test]
    async fn test_timeout_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(serde_json::json!({"message": {"content": "late"}}));
            })
            .await;

        let provider = OllamaProvider::new(
            server.base_url(),
            "llama3.2".to_string(),
            Duration::from_millis(50),
        )
        .unwrap();
        assert!(provider.chat("system", &user("hi")).await.is_err());
    }
}
