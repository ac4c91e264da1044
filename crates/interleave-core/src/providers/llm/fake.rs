use super::{LlmClient, LlmResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Scripted client: replays queued outcomes in order, then falls back to a
/// fixed response (or an error when none is set).
#[derive(Debug)]
pub struct FakeClient {
    model: String,
    script: Mutex<VecDeque<Result<String, String>>>,
    fixed_response: Option<String>,
    calls: AtomicU32,
}

impl FakeClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            script: Mutex::new(VecDeque::new()),
            fixed_response: None,
            calls: AtomicU32::new(0),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    pub fn then_ok(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()))
    }

    pub fn then_err(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()))
    }

    fn push(self, outcome: Result<String, String>) -> Self {
        if let Ok(mut q) = self.script.lock() {
            q.push_back(outcome);
        }
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, _prompt: &str) -> anyhow::Result<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .map_err(|_| anyhow::anyhow!("fake client script poisoned"))?
            .pop_front();
        let text = match next {
            Some(Ok(text)) => text,
            Some(Err(msg)) => anyhow::bail!(msg),
            None => match &self.fixed_response {
                Some(text) => text.clone(),
                None => anyhow::bail!("fake client has no response queued"),
            },
        };

        Ok(LlmResponse {
            text,
            provider: "fake".to_string(),
            model: self.model.clone(),
            meta: serde_json::json!({}),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
