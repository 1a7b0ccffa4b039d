// WHY: reduce a match set to the fraction of candidate characters it covers
// Union of spans, never a sum of lengths, so overlapping n-grams cannot inflate the score

use std::ops::Range;

use crate::normalization::normalize_text;
use crate::pipeline::MatchRecord;

/// Similarity of `candidate_text` given matches found in its normalized form
///
/// Returns 0.0 when the normalized text or the match list is empty.
pub fn score(candidate_text: &str, matches: &[MatchRecord]) -> f64 {
    if matches.is_empty() {
        return 0.0;
    }
    let normalized = normalize_text(candidate_text);
    coverage_ratio(normalized.len(), matches.iter().map(MatchRecord::range))
}

/// Covered fraction of `text_len` positions under the union of `spans`, capped at 1.0
///
/// Positions at or beyond `text_len` are ignored.
pub fn coverage_ratio<I>(text_len: usize, spans: I) -> f64
where
    I: IntoIterator<Item = Range<usize>>,
{
    if text_len == 0 {
        return 0.0;
    }
    let covered = covered_positions(text_len, spans);
    (covered as f64 / text_len as f64).min(1.0)
}

/// Size of the union of `spans` clipped to `0..text_len`
pub fn covered_positions<I>(text_len: usize, spans: I) -> usize
where
    I: IntoIterator<Item = Range<usize>>,
{
    let mut clipped: Vec<Range<usize>> = spans
        .into_iter()
        .map(|span| span.start.min(text_len)..span.end.min(text_len))
        .filter(|span| span.start < span.end)
        .collect();
    clipped.sort_unstable_by_key(|span| span.start);

    let mut covered = 0;
    let mut merged: Option<Range<usize>> = None;
    for span in clipped {
        if let Some(current) = merged.as_mut() {
            if span.start <= current.end {
                current.end = current.end.max(span.end);
                continue;
            }
            covered += current.len();
        }
        merged = Some(span);
    }
    covered + merged.map_or(0, |last| last.len())
}
