// WHY: consumer-side helpers that interpret a DetectionResult
// The score thresholds are reporting policy; detection itself never reads them

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::pipeline::{DetectionResult, MatchRecord};

/// Reuse risk derived from the similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    #[serde(rename = "VERY LOW")]
    VeryLow,
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

impl RiskLevel {
    /// ≥0.8 high, ≥0.5 medium, ≥0.2 low, otherwise very low
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            RiskLevel::High
        } else if score >= 0.5 {
            RiskLevel::Medium
        } else if score >= 0.2 {
            RiskLevel::Low
        } else {
            RiskLevel::VeryLow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
            RiskLevel::VeryLow => "VERY LOW",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary figures over the reported matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchStatistics {
    pub total_matches: usize,
    pub unique_patterns_matched: usize,
    pub average_match_length: f64,
}

impl MatchStatistics {
    pub fn from_matches(matches: &[MatchRecord]) -> Self {
        let unique: HashSet<&str> = matches.iter().map(|m| m.pattern.as_str()).collect();
        let total_len: usize = matches.iter().map(|m| m.pattern.chars().count()).sum();

        Self {
            total_matches: matches.len(),
            unique_patterns_matched: unique.len(),
            average_match_length: total_len as f64 / matches.len().max(1) as f64,
        }
    }
}

impl From<&DetectionResult> for MatchStatistics {
    fn from(result: &DetectionResult) -> Self {
        Self::from_matches(&result.matches)
    }
}

/// Characters of candidate text kept in a report preview
pub const PREVIEW_CHARS: usize = 200;

/// First `max_chars` characters of `text`, with `...` appended when cut
pub fn text_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
