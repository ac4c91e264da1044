use crate::errors::RecordError;
use crate::model::{EvalRecord, QuestionType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Model-specific prompt suffixes from the task file.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PromptOptions {
    #[serde(default)]
    pub oe_post_prompt: String,
    #[serde(default)]
    pub mcq_post_prompt: String,
}

/// Marker after which the dataset's multiple-choice questions carry their
/// own answer instructions.
const ANSWER_MARKER: &str = "Your answer is:";

/// Question text sent to the model under evaluation.
///
/// With an mcq suffix configured, a multiple-choice question is cut to its
/// first line before [`ANSWER_MARKER`] so the dataset's own instructions do
/// not conflict with the suffix.
pub fn render_prompt(record: &EvalRecord, options: &PromptOptions) -> String {
    render_question(&record.question, record.question_type, options)
}

pub fn render_question(question: &str, question_type: QuestionType, options: &PromptOptions) -> String {
    match question_type {
        QuestionType::MultipleChoice if !options.mcq_post_prompt.is_empty() => {
            let head = question.split(ANSWER_MARKER).next().unwrap_or_default();
            let first_line = head.split('\n').next().unwrap_or_default().trim();
            format!("{}\n{}", first_line, options.mcq_post_prompt)
        }
        QuestionType::OpenEnded if !options.oe_post_prompt.is_empty() => {
            format!("{}\n{}", question, options.oe_post_prompt)
        }
        _ => question.to_string(),
    }
}

/// One turn of a multi-turn row.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Turn {
    pub from: String,
    pub value: String,
}

/// Conversation turns of a multi-turn dataset row.
pub fn conversation(doc: &Value) -> Result<Vec<Turn>, RecordError> {
    let sample_id = doc
        .get("sample_id")
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "<unknown>".into());
    let raw = doc
        .get("conversations")
        .ok_or_else(|| RecordError::MissingField {
            sample_id: sample_id.clone(),
            field: "conversations",
        })?;
    serde_json::from_value(raw.clone()).map_err(|_| RecordError::InvalidField {
        sample_id,
        field: "conversations",
        expected: "list of {from, value} turns",
    })
}
