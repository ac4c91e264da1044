use thiserror::Error;

/// A dataset row that cannot be turned into an [`crate::model::EvalRecord`].
///
/// Rows are never repaired; the error is returned to the caller as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("record {sample_id}: missing required field '{field}'")]
    MissingField { sample_id: String, field: &'static str },

    #[error("record {sample_id}: field '{field}' must be a {expected}")]
    InvalidField {
        sample_id: String,
        field: &'static str,
        expected: &'static str,
    },

    #[error("record {sample_id}: unknown question_type '{value}'")]
    UnknownQuestionType { sample_id: String, value: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse task YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("task config is missing metadata.{0}")]
    MissingMetadata(&'static str),

    #[error("invalid judge config: {0}")]
    Invalid(String),
}
