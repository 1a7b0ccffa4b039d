// WHY: Pattern extraction interface shared by every extraction mode
// Turns one normalized source into the set of fragments fed to the automaton

use std::collections::BTreeSet;
use tracing::debug;

use crate::config::ExtractionMode;
use crate::error::ConfigError;

pub mod phrases;
pub mod stopwords;

pub use phrases::{phrases, sliding_window_phrases, Tokenizer};
pub use stopwords::StopWords;

/// Every contiguous substring of `n` characters
///
/// Text shorter than `n` characters yields the whole text as its only
/// n-gram. Empty text and `n == 0` yield nothing. The returned slices borrow
/// from `text`.
pub fn ngrams(text: &str, n: usize) -> BTreeSet<&str> {
    if text.is_empty() || n == 0 {
        return BTreeSet::new();
    }

    // Char boundaries plus the end, so windows never split a code point
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    if boundaries.len() - 1 < n {
        return BTreeSet::from([text]);
    }

    boundaries
        .windows(n + 1)
        .map(|window| &text[window[0]..window[n]])
        .collect()
}

enum Strategy {
    NGram {
        n: usize,
    },
    Phrases {
        tokenizer: Tokenizer,
        min_words: usize,
        max_words: usize,
        min_chars: usize,
    },
    SlidingWindow {
        tokenizer: Tokenizer,
        window: usize,
        min_chars: usize,
    },
}

/// Derives the pattern set of a single normalized source
pub struct PatternExtractor {
    strategy: Strategy,
    min_pattern_len: usize,
    stop_words: StopWords,
}

impl PatternExtractor {
    /// Create extractor for the given mode, discarding patterns shorter than `min_pattern_len`
    pub fn new(mode: ExtractionMode, min_pattern_len: usize) -> Result<Self, ConfigError> {
        let strategy = match mode {
            ExtractionMode::NGram { n: 0 } => return Err(ConfigError::ZeroNgramSize),
            ExtractionMode::NGram { n } => Strategy::NGram { n },
            ExtractionMode::Phrases { min_words, max_words, min_chars } => Strategy::Phrases {
                tokenizer: build_tokenizer()?,
                min_words,
                max_words,
                min_chars,
            },
            ExtractionMode::SlidingWindow { window, min_chars } => Strategy::SlidingWindow {
                tokenizer: build_tokenizer()?,
                window,
                min_chars,
            },
        };

        Ok(Self {
            strategy,
            min_pattern_len,
            stop_words: StopWords::english(),
        })
    }

    /// Fixed n-gram extractor; needs no tokenizer so it cannot fail
    pub fn with_ngrams(n: usize, min_pattern_len: usize) -> Self {
        Self {
            strategy: Strategy::NGram { n },
            min_pattern_len,
            stop_words: StopWords::english(),
        }
    }

    /// Extract deduplicated patterns from already-normalized content
    pub fn extract(&self, normalized: &str) -> BTreeSet<String> {
        let candidates: BTreeSet<String> = match &self.strategy {
            Strategy::NGram { n } => ngrams(normalized, *n).into_iter().map(str::to_owned).collect(),
            Strategy::Phrases { tokenizer, min_words, max_words, min_chars } => {
                phrases(tokenizer, &self.stop_words, normalized, *min_words, *max_words, *min_chars)
            }
            Strategy::SlidingWindow { tokenizer, window, min_chars } => {
                sliding_window_phrases(tokenizer, &self.stop_words, normalized, *window, *min_chars)
            }
        };

        let before = candidates.len();
        let patterns: BTreeSet<String> = candidates
            .into_iter()
            .filter(|pattern| pattern.chars().count() >= self.min_pattern_len)
            .collect();

        debug!(
            "Extracted {} patterns ({} below minimum length) from {} characters",
            patterns.len(),
            before - patterns.len(),
            normalized.len()
        );
        patterns
    }
}

fn build_tokenizer() -> Result<Tokenizer, ConfigError> {
    Tokenizer::new().map_err(|e| ConfigError::Tokenizer(e.to_string()))
}
