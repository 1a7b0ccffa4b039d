// WHY: input problems travel inside DetectionResult and are never returned as Err
// Config errors surface when a detector is built; invariant violations only in checks

use thiserror::Error;

/// Broad classification of a detection error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Candidate text or corpus unusable
    Input,
    /// Nothing usable survived pattern extraction
    Extraction,
}

/// Non-fatal reasons a detection produced no score
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("no text or sources provided")]
    MissingInput,

    #[error("text too short after normalization")]
    TextTooShort { length: usize, minimum: usize },

    #[error("no valid patterns extracted from sources")]
    NoPatterns,
}

impl DetectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DetectionError::MissingInput | DetectionError::TextTooShort { .. } => ErrorKind::Input,
            DetectionError::NoPatterns => ErrorKind::Extraction,
        }
    }
}

/// Rejected detector configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("n-gram size must be at least 1")]
    ZeroNgramSize,

    #[error("phrase window must contain at least one word")]
    ZeroPhraseWindow,

    #[error("phrase min_words ({min}) exceeds max_words ({max})")]
    InvertedPhraseRange { min: usize, max: usize },

    #[error("tokenizer failed to build: {0}")]
    Tokenizer(String),
}

/// Broken automaton invariant; always a construction defect
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("root state must not have a failure link")]
    RootHasFailureLink,

    #[error("state {state} has no failure link")]
    MissingFailureLink { state: usize },

    #[error("state {state} at depth {depth} fails to deeper state {target} at depth {target_depth}")]
    FailureLinkTooDeep { state: usize, depth: usize, target: usize, target_depth: usize },

    #[error("state {state} has {incoming} incoming trie edges")]
    NotATree { state: usize, incoming: usize },

    #[error("output of state {state} is missing pattern {pattern} inherited from state {fail}")]
    OutputNotInherited { state: usize, fail: usize, pattern: usize },

    #[error("root state has a non-empty output set")]
    RootHasOutput,
}
