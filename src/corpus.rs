// WHY: local file loading for the batch driver; the detection core never touches the filesystem
// Directory walks are sorted so corpus order, and with it attribution, is reproducible

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::pipeline::SourceEntry;

/// Extension of text files picked up from directories
pub const TEXT_EXTENSION: &str = "txt";

/// Load a source corpus from a JSON file or a directory of text files
///
/// A file must hold a JSON array of `{"topic": ..., "content": ...}` objects.
/// A directory is walked recursively; each `*.txt` file becomes one entry
/// whose topic is the file stem, in path order.
pub async fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<SourceEntry>> {
    let path = path.as_ref();
    let metadata = fs::metadata(path)
        .await
        .with_context(|| format!("Cannot access corpus {}", path.display()))?;

    let entries = if metadata.is_dir() {
        load_corpus_dir(path).await?
    } else {
        load_corpus_json(path).await?
    };

    info!("Loaded {} source entries from {}", entries.len(), path.display());
    Ok(entries)
}

async fn load_corpus_json(path: &Path) -> Result<Vec<SourceEntry>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read corpus file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Corpus file {} is not a JSON array of sources", path.display()))
}

async fn load_corpus_dir(root: &Path) -> Result<Vec<SourceEntry>> {
    let root_owned = root.to_path_buf();
    // WHY: walkdir is blocking, keep it off the async worker threads
    let files = tokio::task::spawn_blocking(move || collect_text_files(&root_owned)).await??;

    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        let content = fs::read_to_string(&file)
            .await
            .with_context(|| format!("Failed to read source {}", file.display()))?;
        let topic = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("Loaded source '{}' ({} bytes)", topic, content.len());
        entries.push(SourceEntry { topic, content });
    }
    Ok(entries)
}

/// Recursively collect `*.txt` files under `root`, sorted by path
pub fn collect_text_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("Not a directory: {}", root.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == TEXT_EXTENSION))
        .collect();

    files.sort();
    Ok(files)
}

/// Expand candidate arguments into files: directories contribute their `*.txt` files,
/// plain files are taken as given
pub fn discover_candidates(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = collect_text_files(path)?;
            debug!("Found {} candidates in {}", found.len(), path.display());
            candidates.extend(found);
        } else if path.is_file() {
            candidates.push(path.clone());
        } else {
            bail!("Candidate path does not exist: {}", path.display());
        }
    }

    Ok(candidates)
}
