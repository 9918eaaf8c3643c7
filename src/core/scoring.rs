//! Score extraction from scorer output.
//!
//! Scorers are free to print any diagnostics they like as long as the very
//! last thing on stdout is a `key=value` trailer, e.g. `points = 42`.

use std::sync::LazyLock;

use regex::Regex;

static SCORE_TRAILER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"=\s*(\d+(?:\.\d+)?)\s*$").expect("score trailer pattern is valid")
});

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("scorer output does not end with a `=<number>` trailer: {tail:?}")]
pub struct MalformedScore {
    pub tail: String,
}

impl MalformedScore {
    fn new(output: &str) -> Self {
        let trimmed = output.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .nth(39)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        Self {
            tail: trimmed[start..].to_string(),
        }
    }
}

/// Parses the trailing `=<number>` of `output`.
///
/// A bare trailing `=` is malformed, not zero. So is a number too large to
/// be represented as a finite `f64`.
pub fn parse_score(output: &str) -> Result<f64, MalformedScore> {
    SCORE_TRAILER
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|score| score.is_finite())
        .ok_or_else(|| MalformedScore::new(output))
}

/// Like [`parse_score`] but falls back to `0.0`, logging why.
pub fn extract_score(output: &str) -> f64 {
    match parse_score(output) {
        Ok(score) => score,
        Err(e) => {
            tracing::warn!("Could not extract a score, using 0: {}", e);
            0.0
        }
    }
}
