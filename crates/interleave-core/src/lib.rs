pub mod config;
pub mod errors;
pub mod judge;
pub mod model;
pub mod prompt;
pub mod providers;
pub mod visual;

pub use errors::{ConfigError, RecordError};
pub use judge::{JudgeService, ParseError, ParsedJudgement};
pub use model::{EvalRecord, JudgeOutcome, JudgeVerdict, QuestionType, ScoredRecord};
