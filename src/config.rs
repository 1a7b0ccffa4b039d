// WHY: detector knobs in one serde-friendly struct, defaulting to the reference behavior
// Loaded from JSON by the binary and overridden by CLI flags

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How patterns are derived from normalized source content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Every contiguous substring of `n` characters
    NGram { n: usize },
    /// Per-sentence windows of `min_words..=max_words` content words
    Phrases { min_words: usize, max_words: usize, min_chars: usize },
    /// Fixed windows of `window` content words across the whole text
    SlidingWindow { window: usize, min_chars: usize },
}

impl ExtractionMode {
    pub const DEFAULT_NGRAM_SIZE: usize = 6;

    /// Phrase mode with 3 to 8 words and more than 10 characters
    pub fn phrases() -> Self {
        ExtractionMode::Phrases { min_words: 3, max_words: 8, min_chars: 11 }
    }

    /// Sliding window of 5 words and at least 15 characters
    pub fn sliding_window() -> Self {
        ExtractionMode::SlidingWindow { window: 5, min_chars: 15 }
    }
}

impl Default for ExtractionMode {
    fn default() -> Self {
        ExtractionMode::NGram { n: Self::DEFAULT_NGRAM_SIZE }
    }
}

/// Which topic a match reports when several sources produced its pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionPolicy {
    /// Earliest source in corpus order
    FirstSource,
    /// Latest source in corpus order
    #[default]
    LastSource,
    /// Every distinct source in corpus order
    AllSources,
}

/// Configuration for a detection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Pattern extraction mode
    pub extraction: ExtractionMode,
    /// Patterns shorter than this many characters are discarded
    pub min_pattern_len: usize,
    /// Normalized candidates and sources shorter than this are unusable
    pub min_text_len: usize,
    /// Upper bound on matches carried in the result
    pub max_reported_matches: usize,
    /// Source attribution for shared patterns
    pub attribution: AttributionPolicy,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionMode::default(),
            min_pattern_len: 4,
            min_text_len: 10,
            max_reported_matches: 40,
            attribution: AttributionPolicy::default(),
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.extraction {
            ExtractionMode::NGram { n: 0 } => Err(ConfigError::ZeroNgramSize),
            ExtractionMode::Phrases { min_words: 0, .. } => Err(ConfigError::ZeroPhraseWindow),
            ExtractionMode::Phrases { min_words, max_words, .. } if min_words > max_words => {
                Err(ConfigError::InvertedPhraseRange { min: min_words, max: max_words })
            }
            ExtractionMode::SlidingWindow { window: 0, .. } => Err(ConfigError::ZeroPhraseWindow),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_reference_values() {
        let config = DetectorConfig::default();
        assert_eq!(config.extraction, ExtractionMode::NGram { n: 6 });
        assert_eq!(config.min_pattern_len, 4);
        assert_eq!(config.min_text_len, 10);
        assert_eq!(config.max_reported_matches, 40);
        assert_eq!(config.attribution, AttributionPolicy::LastSource);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_windows() {
        let mut config = DetectorConfig::default();

        config.extraction = ExtractionMode::NGram { n: 0 };
        assert_eq!(config.validate(), Err(ConfigError::ZeroNgramSize));

        config.extraction = ExtractionMode::Phrases { min_words: 5, max_words: 2, min_chars: 10 };
        assert_eq!(config.validate(), Err(ConfigError::InvertedPhraseRange { min: 5, max: 2 }));

        config.extraction = ExtractionMode::SlidingWindow { window: 0, min_chars: 15 };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPhraseWindow));

        config.extraction = ExtractionMode::phrases();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"max_reported_matches": 5, "attribution": "all_sources"}"#;
        let config: DetectorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_reported_matches, 5);
        assert_eq!(config.attribution, AttributionPolicy::AllSources);
        assert_eq!(config.extraction, ExtractionMode::NGram { n: 6 });
    }

    #[test]
    fn test_extraction_mode_json_shape() {
        let json = r#"{"extraction": {"mode": "sliding_window", "window": 4, "min_chars": 12}}"#;
        let config: DetectorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.extraction, ExtractionMode::SlidingWindow { window: 4, min_chars: 12 });
    }
}
