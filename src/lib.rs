pub mod automaton;
pub mod config;
pub mod corpus;
pub mod error;
pub mod extraction;
pub mod normalization;
pub mod pipeline;
pub mod report;
pub mod scoring;

// Re-export main types for convenient access
pub use automaton::{scan, Automaton, Match, PatternId, StateId};
pub use config::{AttributionPolicy, DetectorConfig, ExtractionMode};
pub use error::{ConfigError, DetectionError, ErrorKind, InvariantViolation};
pub use normalization::normalize_text;
pub use pipeline::{detect, DetectionResult, Detector, MatchRecord, SourceEntry};

// Re-export extraction and scoring entry points
pub use extraction::{ngrams, PatternExtractor};
pub use report::{text_preview, MatchStatistics, RiskLevel, PREVIEW_CHARS};
pub use scoring::{coverage_ratio, score};
