//! Judge ratings over a batch of open-ended records.

use interleave_core::model::{EvalRecord, JudgeVerdict, ScoredRecord};
use interleave_core::JudgeService;
use serde::Serialize;

/// Ratings are 1–5; the aggregate is reported on 0–100.
pub const RATING_SCALE: f64 = 20.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JudgeAggregate {
    /// Mean rating × [`RATING_SCALE`] over rated verdicts; 0 when none.
    pub score: f64,
    pub rated: usize,
    /// Verdicts without a rating (judge unreachable or reply unparseable).
    pub degraded: usize,
    pub model: Option<String>,
}

/// Judge every eligible record in order, one call at a time.
///
/// Multiple-choice records and open-ended records with an empty reference
/// pass through without a verdict.
pub async fn judge_records(records: Vec<EvalRecord>, service: &JudgeService) -> Vec<ScoredRecord> {
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        out.push(service.judge_record(record).await);
    }
    out
}

/// Aggregate verdicts. Records that were never judged do not appear here;
/// degraded verdicts are counted but contribute no rating.
pub fn aggregate<'a, I>(verdicts: I) -> JudgeAggregate
where
    I: IntoIterator<Item = &'a JudgeVerdict>,
{
    let mut total: u64 = 0;
    let mut rated = 0usize;
    let mut degraded = 0usize;
    let mut model = None;

    for v in verdicts {
        if model.is_none() {
            model = Some(v.model.clone());
        }
        match v.rating {
            Some(r) => {
                total += u64::from(r);
                rated += 1;
            }
            None => degraded += 1,
        }
    }

    let score = if rated == 0 {
        0.0
    } else {
        total as f64 / rated as f64 * RATING_SCALE
    };
    if degraded > 0 {
        tracing::warn!(degraded, rated, "judge verdicts without a rating were excluded");
    }

    JudgeAggregate {
        score,
        rated,
        degraded,
        model,
    }
}

pub fn aggregate_scored(records: &[ScoredRecord]) -> JudgeAggregate {
    aggregate(records.iter().filter_map(|r| r.verdict.as_ref()))
}
