//! Multiple-choice answer normalization and accuracy.

use interleave_core::model::EvalRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// `"C. Paris"` style answers.
static OPTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^([A-E])\.\s*(.+)$").unwrap());

/// Digit-comma-digit, e.g. `1,000`.
static COMMA_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)(,)(\d)").unwrap());

static LETTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b([A-E])\b").unwrap());

const PUNCT: [char; 21] = [
    ';', '/', '[', ']', '"', '{', '}', '(', ')', '=', '+', '\\', '_', '-', '>', '<', '@', '`',
    ',', '?', '!',
];

/// Reduce an answer to its option letter when one can be found, otherwise
/// to lower-cased text with punctuation removed.
pub fn normalize_answer(answer: &str) -> String {
    if let Some(caps) = OPTION_RE.captures(answer.trim()) {
        return caps[1].to_uppercase();
    }

    let flat = answer.replace(['\n', '\t'], " ");
    let stripped = process_punctuation(flat.trim());
    let cleaned = stripped
        .trim_matches('\'')
        .trim_matches('"')
        .trim_matches(')')
        .trim_matches('(')
        .trim()
        .to_lowercase();

    if let Some(caps) = LETTER_RE.captures(&cleaned) {
        return caps[1].to_uppercase();
    }
    cleaned
}

/// Punctuation next to a space (or any text with a digit-comma-digit run)
/// is deleted; otherwise it is replaced by a space. Periods not followed
/// by a digit are then dropped.
fn process_punctuation(in_text: &str) -> String {
    let comma_digit = COMMA_STRIP_RE.is_match(in_text);
    let mut out = in_text.to_string();
    for p in PUNCT {
        let spaced = in_text.contains(&format!("{p} ")) || in_text.contains(&format!(" {p}"));
        if spaced || comma_digit {
            out = out.replace(p, "");
        } else {
            out = out.replace(p, " ");
        }
    }
    strip_periods(&out)
}

fn strip_periods(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '.' && !chars.peek().is_some_and(|n| n.is_ascii_digit()) {
            continue;
        }
        out.push(c);
    }
    out
}

/// Whether the normalized prediction equals the normalized reference.
pub fn is_correct(record: &EvalRecord) -> bool {
    normalize_answer(&record.prediction) == normalize_answer(&record.answer)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct McqAccuracy {
    /// Fraction correct over every multiple-choice record, in `[0, 1]`.
    pub overall: f64,
    pub correct: usize,
    pub total: usize,
    /// Accuracy per subtask, in percent.
    pub per_subtask: BTreeMap<String, f64>,
}

/// Accuracy over the multiple-choice records in `records`; other records
/// are ignored. No multiple-choice records gives an accuracy of 0.
pub fn accuracy<'a, I>(records: I) -> McqAccuracy
where
    I: IntoIterator<Item = &'a EvalRecord>,
{
    let mut by_subtask: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    let mut correct = 0usize;
    let mut total = 0usize;

    for rec in records.into_iter().filter(|r| r.is_multiple_choice()) {
        let hit = is_correct(rec);
        let entry = by_subtask.entry(rec.sub_task.clone()).or_default();
        entry.1 += 1;
        total += 1;
        if hit {
            entry.0 += 1;
            correct += 1;
        }
    }

    let per_subtask: BTreeMap<String, f64> = by_subtask
        .into_iter()
        .map(|(sub_task, (hits, n))| {
            let pct = hits as f64 / n as f64 * 100.0;
            tracing::info!(sub_task = %sub_task, accuracy = pct, "Multi-Choice Sub-Task {sub_task} - accuracy: {pct}");
            (sub_task, pct)
        })
        .collect();

    let overall = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    };

    McqAccuracy {
        overall,
        correct,
        total,
        per_subtask,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interleave_core::model::QuestionType;

    fn mc(sub_task: &str, pred: &str, answer: &str) -> EvalRecord {
        EvalRecord {
            sample_id: format!("{sub_task}-{pred}"),
            sub_task: sub_task.into(),
            question: "Which one?".into(),
            question_type: QuestionType::MultipleChoice,
            answer: answer.into(),
            prediction: pred.into(),
        }
    }

    #[test]
    fn option_form_reduces_to_letter() {
        assert_eq!(normalize_answer("C. Paris"), "C");
        assert_eq!(normalize_answer("  b.   the red one "), "B");
        assert_eq!(normalize_answer("C. Paris"), normalize_answer("C. Paris"));
    }

    #[test]
    fn parenthesized_letter_is_found() {
        assert_eq!(normalize_answer("(B)"), "B");
        assert_eq!(normalize_answer("The answer is (d)."), "D");
    }

    #[test]
    fn bare_letter_and_quotes() {
        assert_eq!(normalize_answer("'A'"), "A");
        assert_eq!(normalize_answer("\"e\"\n"), "E");
    }

    #[test]
    fn free_text_is_lowercased_and_stripped() {
        assert_eq!(normalize_answer("Two dogs!"), "two dogs");
        assert_eq!(normalize_answer("yes."), "yes");
    }

    #[test]
    fn punctuation_between_words_becomes_space() {
        assert_eq!(normalize_answer("left/right"), "left right");
        assert_eq!(normalize_answer("left / right"), "left  right");
    }

    #[test]
    fn digit_comma_digit_deletes_punctuation() {
        assert_eq!(normalize_answer("1,000"), "1000");
        assert_eq!(normalize_answer("3.5"), "3.5");
    }

    #[test]
    fn option_letter_followed_by_newline() {
        assert_eq!(normalize_answer("B.\nbecause it matches"), "B");
    }

    #[test]
    fn accuracy_counts_multiple_choice_only() {
        let mut oe = mc("oe", "anything", "else");
        oe.question_type = QuestionType::OpenEnded;
        let recs = vec![
            mc("Puzzle", "C. Paris", "C. Paris"),
            mc("Puzzle", "A", "B"),
            mc("Comics", "(D)", "D"),
            oe,
        ];
        let acc = accuracy(&recs);
        assert_eq!(acc.total, 3);
        assert_eq!(acc.correct, 2);
        assert!((acc.overall - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(acc.per_subtask["Puzzle"], 50.0);
        assert_eq!(acc.per_subtask["Comics"], 100.0);
        assert!(!acc.per_subtask.contains_key("oe"));
    }

    #[test]
    fn accuracy_without_multiple_choice_is_zero() {
        let acc = accuracy(&Vec::<EvalRecord>::new());
        assert_eq!(acc.overall, 0.0);
        assert_eq!(acc.total, 0);
    }
}
