use crate::errors::RecordError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    /// Fixed option set, scored by normalized exact match.
    #[serde(rename = "multi-choice", alias = "multiple-choice")]
    MultipleChoice,
    /// Free-form answer, scored by text similarity and the judge.
    #[serde(rename = "open-ended")]
    OpenEnded,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multi-choice",
            QuestionType::OpenEnded => "open-ended",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multi-choice" | "multiple-choice" => Ok(QuestionType::MultipleChoice),
            "open-ended" => Ok(QuestionType::OpenEnded),
            other => Err(other.to_string()),
        }
    }
}

/// One benchmark instance paired with the model's raw prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalRecord {
    pub sample_id: String,
    #[serde(alias = "subtask")]
    pub sub_task: String,
    pub question: String,
    pub question_type: QuestionType,
    /// Reference answer. May be empty for open-ended rows without ground truth.
    pub answer: String,
    #[serde(rename = "parsed_pred", alias = "prediction")]
    pub prediction: String,
}

impl EvalRecord {
    /// Builds a record from a dataset row and the model output for it.
    ///
    /// `sample_id` may be a string or a number in the dataset; every other
    /// field must be a string.
    pub fn from_doc(doc: &Value, prediction: impl Into<String>) -> Result<Self, RecordError> {
        let obj = doc.as_object().ok_or(RecordError::NotAnObject)?;

        let sample_id = match obj.get("sample_id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(_) => {
                return Err(RecordError::InvalidField {
                    sample_id: "<unknown>".into(),
                    field: "sample_id",
                    expected: "string or number",
                })
            }
            None => {
                return Err(RecordError::MissingField {
                    sample_id: "<unknown>".into(),
                    field: "sample_id",
                })
            }
        };

        let text = |field: &'static str| -> Result<String, RecordError> {
            match obj.get(field) {
                Some(Value::String(s)) => Ok(s.clone()),
                Some(_) => Err(RecordError::InvalidField {
                    sample_id: sample_id.clone(),
                    field,
                    expected: "string",
                }),
                None => Err(RecordError::MissingField {
                    sample_id: sample_id.clone(),
                    field,
                }),
            }
        };

        let sub_task = match obj.get("sub_task").or_else(|| obj.get("subtask")) {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(RecordError::InvalidField {
                    sample_id: sample_id.clone(),
                    field: "sub_task",
                    expected: "string",
                })
            }
            None => {
                return Err(RecordError::MissingField {
                    sample_id: sample_id.clone(),
                    field: "sub_task",
                })
            }
        };
        let question = text("question")?;
        let raw_type = text("question_type")?;
        let question_type =
            raw_type
                .parse()
                .map_err(|value| RecordError::UnknownQuestionType {
                    sample_id: sample_id.clone(),
                    value,
                })?;
        let answer = text("answer")?;

        Ok(Self {
            sample_id,
            sub_task,
            question,
            question_type,
            answer,
            prediction: prediction.into(),
        })
    }

    pub fn is_open_ended(&self) -> bool {
        self.question_type == QuestionType::OpenEnded
    }

    pub fn is_multiple_choice(&self) -> bool {
        self.question_type == QuestionType::MultipleChoice
    }

    /// Open-ended rows without a reference answer are never judged or scored.
    pub fn has_reference(&self) -> bool {
        !self.answer.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgeOutcome {
    Rated,
    /// The judge answered but the text did not contain an explanation and rating.
    ParseFailed,
    /// Every attempt to reach the judge failed.
    Unavailable,
}

/// Result of a judge call.
///
/// `rating` is `None` for degraded verdicts so that "no signal" cannot be
/// confused with a genuine low score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeVerdict {
    pub explanation: String,
    pub rating: Option<u32>,
    pub model: String,
    pub outcome: JudgeOutcome,
}

impl JudgeVerdict {
    pub fn rated(explanation: impl Into<String>, rating: u32, model: impl Into<String>) -> Self {
        Self {
            explanation: explanation.into(),
            rating: Some(rating),
            model: model.into(),
            outcome: JudgeOutcome::Rated,
        }
    }

    pub fn degraded(model: impl Into<String>, outcome: JudgeOutcome) -> Self {
        Self {
            explanation: String::new(),
            rating: None,
            model: model.into(),
            outcome,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.rating.is_none()
    }

    /// Legacy encoding used by harness reports: degraded verdicts read as 0.
    pub fn rating_or_zero(&self) -> u32 {
        self.rating.unwrap_or(0)
    }
}

/// Per-record output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: EvalRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge_input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<JudgeVerdict>,
}

impl ScoredRecord {
    pub fn unjudged(record: EvalRecord) -> Self {
        Self {
            record,
            judge_input: None,
            verdict: None,
        }
    }
}
