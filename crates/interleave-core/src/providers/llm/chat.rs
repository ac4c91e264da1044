use super::{LlmClient, LlmResponse};
use crate::config::JudgeConfig;
use async_trait::async_trait;
use serde_json::json;

/// OpenAI-compatible chat-completions client.
///
/// The same wire format serves both provider profiles; only the endpoint and
/// the authentication header differ (see [`JudgeConfig::auth_header`]).
pub struct ChatCompletionClient {
    config: JudgeConfig,
    client: reqwest::Client,
}

impl ChatCompletionClient {
    pub fn new(config: JudgeConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    pub(crate) fn request_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt }
                    ]
                }
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        })
    }
}

#[async_trait]
impl LlmClient for ChatCompletionClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        let Some((header, value)) = self.config.auth_header() else {
            anyhow::bail!(
                "judge provider '{}' is disabled; no endpoint configured",
                self.config.api_type
            );
        };
        if self.config.endpoint.is_empty() {
            anyhow::bail!("judge endpoint is empty");
        }

        let body = self.request_body(prompt);
        tracing::debug!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            "sending judge request"
        );

        let resp = self
            .client
            .post(&self.config.endpoint)
            .header(header, value)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "{} chat API error (status {}): {}",
                self.config.api_type,
                status.as_u16(),
                error_text
            );
        }

        let json: serde_json::Value = resp.json().await?;
        let text = json
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("chat API response missing choices[0].message.content"))?
            .to_string();

        Ok(LlmResponse {
            text,
            provider: self.config.api_type.name().to_string(),
            model: self.config.model.clone(),
            meta: json.get("usage").cloned().unwrap_or(serde_json::Value::Null),
        })
    }

    fn provider_name(&self) -> &'static str {
        "chat-completions"
    }
}
