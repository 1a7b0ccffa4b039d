// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use verbatim::SourceEntry;

/// Test fixture helper for creating temporary corpora and candidate files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Create a text file with given content, creating parent directories as needed
    pub fn create_text_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Write a JSON corpus file holding the given entries
    pub fn create_corpus_json<P: AsRef<Path>>(&self, relative_path: P, entries: &[SourceEntry]) -> PathBuf {
        let json = serde_json::to_string_pretty(entries).expect("Failed to serialize corpus");
        self.create_text_file(relative_path, &json)
    }

    /// Write one `<topic>.txt` per entry under a corpus directory
    pub fn create_corpus_dir<P: AsRef<Path>>(&self, relative_dir: P, entries: &[SourceEntry]) -> PathBuf {
        let dir = self.root_path.join(relative_dir);
        fs::create_dir_all(&dir).expect("Failed to create corpus directory");
        for entry in entries {
            fs::write(dir.join(format!("{}.txt", entry.topic)), &entry.content)
                .expect("Failed to write corpus entry");
        }
        dir
    }
}

/// Naive overlapping search used as an oracle: every (start, pattern) occurrence
pub fn naive_occurrences(patterns: &[String], text: &str) -> Vec<(usize, String)> {
    let mut found = Vec::new();
    for pattern in patterns {
        if pattern.is_empty() {
            continue;
        }
        for (start, _) in text.char_indices() {
            if text[start..].starts_with(pattern.as_str()) {
                found.push((start, pattern.clone()));
            }
        }
    }
    found.sort();
    found.dedup();
    found
}
