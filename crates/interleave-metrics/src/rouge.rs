//! ROUGE-L for open-ended answers.
//!
//! Summary-level ROUGE-L: both texts are split into sentences on `.` and
//! into tokens on whitespace. The LCS token sets of every
//! (reference sentence, candidate sentence) pair are unioned, and recall
//! and precision are taken against the unique token counts of each side.

use interleave_core::model::EvalRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Predictions longer than this (in characters) are truncated before scoring.
pub const MAX_PREDICTION_CHARS: usize = 512;

/// Similarity between a candidate and a reference, as an F-measure in `[0, 1]`.
pub trait TextSimilarity: Send + Sync {
    fn f_measure(&self, candidate: &str, reference: &str) -> f64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RougeL;

impl TextSimilarity for RougeL {
    fn f_measure(&self, candidate: &str, reference: &str) -> f64 {
        let cand = sentences(candidate);
        let refs = sentences(reference);

        let n = unique_tokens(&cand);
        let m = unique_tokens(&refs);
        if n == 0 || m == 0 {
            return 0.0;
        }

        let mut union: HashSet<&str> = HashSet::new();
        for r in &refs {
            for c in &cand {
                union.extend(lcs_tokens(r, c));
            }
        }

        let llcs = union.len() as f64;
        let recall = llcs / m as f64;
        let precision = llcs / n as f64;
        2.0 * (precision * recall) / (precision + recall + 1e-8)
    }
}

fn sentences(text: &str) -> Vec<Vec<&str>> {
    text.split('.')
        .map(|s| s.split_whitespace().collect::<Vec<_>>())
        .filter(|s| !s.is_empty())
        .collect()
}

fn unique_tokens(sentences: &[Vec<&str>]) -> usize {
    sentences.iter().flatten().collect::<HashSet<_>>().len()
}

/// Tokens of one longest common subsequence of `x` and `y`.
fn lcs_tokens<'a>(x: &[&'a str], y: &[&'a str]) -> Vec<&'a str> {
    let (rows, cols) = (x.len(), y.len());
    let mut table = vec![vec![0usize; cols + 1]; rows + 1];
    for i in 1..=rows {
        for j in 1..=cols {
            table[i][j] = if x[i - 1] == y[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut out = Vec::with_capacity(table[rows][cols]);
    let (mut i, mut j) = (rows, cols);
    while i > 0 && j > 0 {
        if x[i - 1] == y[j - 1] {
            out.push(x[i - 1]);
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] > table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    out.reverse();
    out
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RougeSummary {
    /// Mean ROUGE-L F over scored records, scaled to 0–100.
    pub score: f64,
    pub scored: usize,
    /// Open-ended records skipped for lack of a reference answer.
    pub skipped: usize,
    /// Mean ROUGE-L F per subtask, in `[0, 1]`.
    pub per_subtask: BTreeMap<String, f64>,
}

/// Mean ROUGE-L over open-ended records with a reference answer.
///
/// An empty prediction scores 0; long predictions are truncated to
/// [`MAX_PREDICTION_CHARS`].
pub fn open_ended_rouge<'a, I>(records: I, scorer: &dyn TextSimilarity) -> RougeSummary
where
    I: IntoIterator<Item = &'a EvalRecord>,
{
    let mut by_subtask: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut scores = Vec::new();
    let mut skipped = 0usize;

    for rec in records.into_iter().filter(|r| r.is_open_ended()) {
        if !rec.has_reference() {
            skipped += 1;
            continue;
        }
        let score = if rec.prediction.is_empty() {
            0.0
        } else {
            let pred = truncate_chars(&rec.prediction, MAX_PREDICTION_CHARS);
            scorer.f_measure(pred, &rec.answer)
        };
        scores.push(score);
        by_subtask.entry(rec.sub_task.clone()).or_default().push(score);
    }

    let per_subtask = by_subtask
        .into_iter()
        .map(|(sub_task, s)| {
            let m = mean(&s);
            tracing::info!(sub_task = %sub_task, rouge_l = m, "Open-Ended Sub-Task {sub_task} - ROUGE-L: {m}");
            (sub_task, m)
        })
        .collect();

    RougeSummary {
        score: mean(&scores) * 100.0,
        scored: scores.len(),
        skipped,
        per_subtask,
    }
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}
