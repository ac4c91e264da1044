use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Ratings the judge prompt asks for.
pub const RATING_RANGE: std::ops::RangeInclusive<u32> = 1..=5;

static EXPLANATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^Explanation:[ \t]*(.*?)[ \t]*\r?$").unwrap());

static RATING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^Rating:[ \t]*(\d+)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedJudgement {
    pub explanation: String,
    pub rating: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("judge output has no 'Explanation:' line")]
    MissingExplanation,
    #[error("judge output has no 'Rating: <int>' line")]
    MissingRating,
    #[error("judge rating '{0}' is not an integer in 1..=5")]
    InvalidRating(String),
}

/// Extract the explanation and rating lines from free-form judge output.
///
/// Markers must start a line; the first match of each wins. Ratings outside
/// [`RATING_RANGE`] are rejected.
pub fn parse_judge_output(text: &str) -> Result<ParsedJudgement, ParseError> {
    let explanation = EXPLANATION_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(ParseError::MissingExplanation)?;

    let raw = RATING_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or(ParseError::MissingRating)?;
    let rating = raw
        .parse::<u32>()
        .ok()
        .filter(|r| RATING_RANGE.contains(r))
        .ok_or_else(|| ParseError::InvalidRating(raw.to_string()))?;

    Ok(ParsedJudgement {
        explanation,
        rating,
    })
}
