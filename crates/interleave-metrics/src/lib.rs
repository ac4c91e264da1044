//! Scoring for interleaved multi-image VQA.
//!
//! Multiple-choice answers are normalized and matched exactly, open-ended
//! answers are scored with ROUGE-L and, optionally, rated by a remote judge.

pub mod judge;
pub mod mcq;
pub mod process;
pub mod rouge;
pub mod summary;

pub use judge::{aggregate, aggregate_scored, judge_records, JudgeAggregate};
pub use mcq::{normalize_answer, McqAccuracy};
pub use process::{process_results, row_predictions, MetricRows, METRIC_KEYS};
pub use rouge::{open_ended_rouge, RougeL, RougeSummary, TextSimilarity};
pub use summary::{score_records, ScoreSummary};
