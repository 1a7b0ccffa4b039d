// WHY: Per-request orchestration: validate, extract, attribute, build, scan, score
// Every call owns its automaton; nothing is shared between detections

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::{debug, info, warn};

use crate::automaton::{Automaton, Match};
use crate::config::{AttributionPolicy, DetectorConfig, ExtractionMode};
use crate::error::{ConfigError, DetectionError};
use crate::extraction::PatternExtractor;
use crate::normalization::{normalize_text, normalize_text_into};
use crate::scoring::coverage_ratio;

/// Topic reported for sources that carry none
pub const UNKNOWN_TOPIC: &str = "Unknown";

/// One reference document of the source corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub content: String,
}

impl SourceEntry {
    pub fn new(topic: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            content: content.into(),
        }
    }

    fn label(&self) -> &str {
        if self.topic.is_empty() {
            UNKNOWN_TOPIC
        } else {
            &self.topic
        }
    }
}

/// A pattern occurrence in the normalized candidate text
///
/// `normalized[start..end] == pattern` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub pattern: String,
    pub start: usize,
    /// Exclusive
    pub end: usize,
    /// Topics the pattern is attributed to, per the configured policy
    pub sources: Vec<String>,
}

impl MatchRecord {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Outcome of one detection call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResult {
    /// Covered fraction of the normalized candidate, in `[0, 1]`
    pub score: f64,
    /// First matches in scan order, at most `max_reported_matches`
    pub matches: Vec<MatchRecord>,
    /// Matches found before truncation
    pub total_matches: usize,
    /// Distinct patterns compiled into the automaton
    pub patterns_used: usize,
    /// Source entries that passed the usability filter
    pub sources_used: usize,
    pub normalized_text_length: usize,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<DetectionError>,
}

impl DetectionResult {
    fn failed(error: DetectionError, normalized_text_length: usize) -> Self {
        Self {
            score: 0.0,
            matches: Vec::new(),
            total_matches: 0,
            patterns_used: 0,
            sources_used: 0,
            normalized_text_length,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

fn serialize_error<S: Serializer>(error: &Option<DetectionError>, serializer: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.serialize_some(&error.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Pattern to source-index map built once per call from the whole corpus
struct Attribution {
    policy: AttributionPolicy,
    sources_by_pattern: BTreeMap<String, Vec<usize>>,
}

impl Attribution {
    fn new(policy: AttributionPolicy) -> Self {
        Self {
            policy,
            sources_by_pattern: BTreeMap::new(),
        }
    }

    /// Record that `source` produced `pattern`; sources arrive in corpus order
    fn record(&mut self, pattern: String, source: usize) {
        let sources = self.sources_by_pattern.entry(pattern).or_default();
        match self.policy {
            AttributionPolicy::FirstSource => {
                if sources.is_empty() {
                    sources.push(source);
                }
            }
            AttributionPolicy::LastSource => {
                sources.clear();
                sources.push(source);
            }
            AttributionPolicy::AllSources => {
                if sources.last() != Some(&source) {
                    sources.push(source);
                }
            }
        }
    }

    fn topics(&self, pattern: &str, corpus: &[SourceEntry]) -> Vec<String> {
        self.sources_by_pattern
            .get(pattern)
            .map(|indices| indices.iter().map(|&i| corpus[i].label().to_string()).collect())
            .unwrap_or_default()
    }

    fn patterns(&self) -> impl Iterator<Item = &String> {
        self.sources_by_pattern.keys()
    }

    fn is_empty(&self) -> bool {
        self.sources_by_pattern.is_empty()
    }
}

/// Text reuse detector
///
/// Holds only configuration; each [`Detector::detect`] call builds and
/// discards its own automaton, so one detector can serve concurrent callers.
pub struct Detector {
    config: DetectorConfig,
    extractor: PatternExtractor,
}

impl Detector {
    /// Create detector with custom configuration
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let extractor = PatternExtractor::new(config.extraction, config.min_pattern_len)?;
        Ok(Self { config, extractor })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Find every source fragment inside `candidate_text` and score the coverage
    ///
    /// Input problems are reported through [`DetectionResult::error`] with a
    /// zero score and no matches.
    pub fn detect(&self, candidate_text: &str, sources: &[SourceEntry]) -> DetectionResult {
        if candidate_text.is_empty() || sources.is_empty() {
            warn!("Detection skipped: {}", DetectionError::MissingInput);
            return DetectionResult::failed(DetectionError::MissingInput, 0);
        }

        let normalized = normalize_text(candidate_text);
        if normalized.len() < self.config.min_text_len {
            let error = DetectionError::TextTooShort {
                length: normalized.len(),
                minimum: self.config.min_text_len,
            };
            warn!("Detection skipped: {} ({} < {})", error, normalized.len(), self.config.min_text_len);
            return DetectionResult::failed(error, normalized.len());
        }

        let (attribution, sources_used) = self.attribute_patterns(sources);
        if attribution.is_empty() {
            warn!("Detection skipped: {} ({} sources checked)", DetectionError::NoPatterns, sources.len());
            return DetectionResult::failed(DetectionError::NoPatterns, normalized.len());
        }

        let automaton = Automaton::build(attribution.patterns());
        let matches: Vec<Match> = automaton.find_iter(&normalized).collect();
        let score = coverage_ratio(normalized.len(), matches.iter().map(Match::range));

        let reported: Vec<MatchRecord> = matches
            .iter()
            .take(self.config.max_reported_matches)
            .map(|m| {
                let pattern = automaton.pattern(m.pattern());
                MatchRecord {
                    pattern: pattern.to_string(),
                    start: m.start(),
                    end: m.end(),
                    sources: attribution.topics(pattern, sources),
                }
            })
            .collect();

        info!(
            "Detected {} matches ({} reported) from {} patterns over {} characters, score {:.4}",
            matches.len(),
            reported.len(),
            automaton.pattern_count(),
            normalized.len(),
            score
        );

        DetectionResult {
            score,
            matches: reported,
            total_matches: matches.len(),
            patterns_used: automaton.pattern_count(),
            sources_used,
            normalized_text_length: normalized.len(),
            error: None,
        }
    }

    /// Extract patterns from every usable source and attribute them
    fn attribute_patterns(&self, sources: &[SourceEntry]) -> (Attribution, usize) {
        let mut attribution = Attribution::new(self.config.attribution);
        let mut buffer = String::new();
        let mut sources_used = 0;

        for (index, source) in sources.iter().enumerate() {
            normalize_text_into(&source.content, &mut buffer);
            if buffer.len() < self.config.min_text_len {
                debug!(
                    "Skipping source '{}': {} normalized characters",
                    source.label(),
                    buffer.len()
                );
                continue;
            }

            sources_used += 1;
            for pattern in self.extractor.extract(&buffer) {
                attribution.record(pattern, index);
            }
        }

        (attribution, sources_used)
    }
}

impl Default for Detector {
    fn default() -> Self {
        let config = DetectorConfig::default();
        Self {
            extractor: PatternExtractor::with_ngrams(ExtractionMode::DEFAULT_NGRAM_SIZE, config.min_pattern_len),
            config,
        }
    }
}

/// Run one detection with the default configuration
pub fn detect(candidate_text: &str, sources: &[SourceEntry]) -> DetectionResult {
    Detector::default().detect(candidate_text, sources)
}
