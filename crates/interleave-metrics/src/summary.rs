use crate::judge::{aggregate_scored, judge_records, JudgeAggregate};
use crate::mcq::{self, McqAccuracy};
use crate::rouge::{open_ended_rouge, RougeSummary, TextSimilarity};
use interleave_core::model::{EvalRecord, ScoredRecord};
use interleave_core::JudgeService;
use serde::Serialize;

/// Every aggregate for one batch of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub records: usize,
    pub mcq_acc: McqAccuracy,
    pub oe_rouge: RougeSummary,
    /// Absent when no judge was configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oe_judge: Option<JudgeAggregate>,
}

/// Score a batch: MCQ accuracy, open-ended ROUGE-L and, with a judge,
/// judge ratings. Returns the summary and the per-record rows.
pub async fn score_records(
    records: Vec<EvalRecord>,
    scorer: &dyn TextSimilarity,
    judge: Option<&JudgeService>,
) -> (ScoreSummary, Vec<ScoredRecord>) {
    let mcq_acc = mcq::accuracy(&records);
    let oe_rouge = open_ended_rouge(&records, scorer);
    let total = records.len();

    let (oe_judge, rows) = match judge {
        Some(service) => {
            let rows = judge_records(records, service).await;
            (Some(aggregate_scored(&rows)), rows)
        }
        None => (None, records.into_iter().map(ScoredRecord::unjudged).collect()),
    };

    tracing::info!(
        records = total,
        mcq_acc = mcq_acc.overall,
        oe_rouge = oe_rouge.score,
        oe_judge = oe_judge.as_ref().map(|j| j.score),
        "scoring complete"
    );

    (
        ScoreSummary {
            records: total,
            mcq_acc,
            oe_rouge,
            oe_judge,
        },
        rows,
    )
}
