use super::task::TaskConfig;
use crate::errors::ConfigError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

pub const OPENAI_API_URL_ENV: &str = "OPENAI_API_URL";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const AZURE_ENDPOINT_ENV: &str = "AZURE_ENDPOINT";
pub const AZURE_API_KEY_ENV: &str = "AZURE_API_KEY";

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_AZURE_URL: &str = "https://api.cognitive.microsoft.com/sts/v1.0/issueToken";

/// Judge provider profile. The two live profiles differ only in default
/// endpoint and authentication header.
///
/// Serializes as the selector it was parsed from, so printed configs can be
/// pasted back into `metadata.api_type`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiType {
    OpenAi,
    Azure,
    /// Unknown selector; requests go nowhere and every attempt fails.
    Disabled(String),
}

impl ApiType {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => ApiType::OpenAi,
            "azure" => ApiType::Azure,
            _ => ApiType::Disabled(s.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ApiType::OpenAi => "openai",
            ApiType::Azure => "azure",
            ApiType::Disabled(raw) => raw.as_str(),
        }
    }
}

impl Serialize for ApiType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bounded retry with a fixed wait between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    #[serde(with = "duration_secs")]
    pub wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            wait: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, wait: Duration) -> Self {
        Self { max_attempts, wait }
    }

    /// Same attempt budget, no waiting. Used by tests and offline replays.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Worst-case time spent waiting between attempts of a single call.
    pub fn worst_case_wait(&self) -> Duration {
        self.wait * self.max_attempts.saturating_sub(1)
    }
}

/// Explicit judge configuration, resolved once at process entry and handed
/// to [`crate::judge::JudgeService`].
#[derive(Clone, PartialEq, Serialize)]
pub struct JudgeConfig {
    pub model: String,
    pub api_type: ApiType,
    pub endpoint: String,
    #[serde(skip)]
    pub api_key: String,
    pub retry: RetryPolicy,
    /// Bound on each individual network attempt.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl fmt::Debug for JudgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JudgeConfig")
            .field("model", &self.model)
            .field("api_type", &self.api_type)
            .field("endpoint", &self.endpoint)
            .field("api_key", &redact(&self.api_key))
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl JudgeConfig {
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Resolve endpoint and key for `api_type` using `env` for lookups.
    ///
    /// `env` is usually `|k| std::env::var(k).ok()`; tests pass a map.
    pub fn resolve<F>(model: impl Into<String>, api_type: &str, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_type = ApiType::parse(api_type);
        let (endpoint, api_key) = match &api_type {
            ApiType::OpenAi => (
                env(OPENAI_API_URL_ENV).unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string()),
                env(OPENAI_API_KEY_ENV),
            ),
            ApiType::Azure => (
                env(AZURE_ENDPOINT_ENV).unwrap_or_else(|| DEFAULT_AZURE_URL.to_string()),
                env(AZURE_API_KEY_ENV),
            ),
            ApiType::Disabled(raw) => {
                tracing::warn!(api_type = %raw, "unknown judge api_type; judge calls are disabled");
                (String::new(), Some(String::new()))
            }
        };

        let api_key = api_key.unwrap_or_else(|| {
            tracing::warn!(provider = %api_type, "judge API key not set in environment");
            String::new()
        });

        Self {
            model: model.into(),
            api_type,
            endpoint,
            api_key,
            retry: RetryPolicy::default(),
            timeout: Self::DEFAULT_TIMEOUT,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            temperature: 0.0,
        }
    }

    pub fn from_process_env(model: impl Into<String>, api_type: &str) -> Self {
        Self::resolve(model, api_type, |k| std::env::var(k).ok())
    }

    /// Resolve from the task file's `metadata` block.
    pub fn from_task<F>(task: &TaskConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model = task.judge_model_name()?;
        let api_type = task.api_type()?;
        Ok(Self::resolve(model, api_type, env))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.api_type, ApiType::Disabled(_)) && !self.endpoint.is_empty()
    }

    /// Authentication header for the provider profile, `None` when disabled.
    pub fn auth_header(&self) -> Option<(&'static str, String)> {
        match self.api_type {
            ApiType::OpenAi => Some(("Authorization", format!("Bearer {}", self.api_key))),
            ApiType::Azure => Some(("api-key", self.api_key.clone())),
            ApiType::Disabled(_) => None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("judge model name is empty".into()));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }
}
