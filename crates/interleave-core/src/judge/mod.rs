//! Remote judge for open-ended answers.
//!
//! - prompt.rs: rating prompt template
//! - parse.rs: pure parser for the judge's free-text reply
//! - run.rs: request with bounded retry

mod parse;
mod prompt;
mod run;

#[cfg(test)]
mod tests;

pub use parse::{parse_judge_output, ParseError, ParsedJudgement};
pub use prompt::build_judge_prompt;

use crate::config::JudgeConfig;
use crate::model::{EvalRecord, JudgeOutcome, JudgeVerdict, ScoredRecord};
use crate::providers::llm::chat::ChatCompletionClient;
use crate::providers::llm::LlmClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct JudgeService {
    config: JudgeConfig,
    client: Arc<dyn LlmClient>,
}

impl JudgeService {
    pub fn new(config: JudgeConfig, client: Arc<dyn LlmClient>) -> Self {
        Self { config, client }
    }

    /// Service backed by the chat-completions endpoint named in `config`.
    pub fn from_config(config: JudgeConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let client = ChatCompletionClient::new(config.clone())?;
        Ok(Self::new(config, Arc::new(client)))
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    /// Rate `model_answer` against `reference_answer`.
    ///
    /// Never fails: exhausted retries and unparseable replies both come back
    /// as degraded verdicts without a rating. Callers skip this entirely
    /// when the reference is empty.
    pub async fn rate(
        &self,
        question: &str,
        model_answer: &str,
        reference_answer: &str,
    ) -> JudgeVerdict {
        let prompt = build_judge_prompt(question, model_answer, reference_answer);
        self.rate_prompt(&prompt).await
    }

    pub(crate) async fn rate_prompt(&self, prompt: &str) -> JudgeVerdict {
        let model = self.config.model.as_str();
        let Some(text) = run::request_with_retry(self, prompt).await else {
            return JudgeVerdict::degraded(model, JudgeOutcome::Unavailable);
        };

        match parse_judge_output(&text) {
            Ok(parsed) => JudgeVerdict::rated(parsed.explanation, parsed.rating, model),
            Err(e) => {
                tracing::error!(error = %e, output = %text, "failed to parse judge output");
                JudgeVerdict::degraded(model, JudgeOutcome::ParseFailed)
            }
        }
    }

    /// Judge one record when it is eligible: open-ended with a reference.
    ///
    /// Ineligible records come back unjudged and the client is not called.
    pub async fn judge_record(&self, record: EvalRecord) -> ScoredRecord {
        if !record.is_open_ended() || !record.has_reference() {
            return ScoredRecord::unjudged(record);
        }
        let prompt = build_judge_prompt(&record.question, &record.prediction, &record.answer);
        let verdict = self.rate_prompt(&prompt).await;
        if verdict.is_degraded() {
            tracing::error!(
                sample_id = %record.sample_id,
                outcome = ?verdict.outcome,
                "judge produced no rating"
            );
        }
        ScoredRecord {
            record,
            judge_input: Some(prompt),
            verdict: Some(verdict),
        }
    }
}
