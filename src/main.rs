// WHY: batch driver that checks many candidates against one corpus load
// Detections run on the blocking pool; the async side only does file I/O and reporting

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use verbatim::corpus::{discover_candidates, load_corpus};
use verbatim::{
    text_preview, AttributionPolicy, DetectionResult, Detector, DetectorConfig, ExtractionMode,
    MatchStatistics, RiskLevel, SourceEntry, PREVIEW_CHARS,
};

#[derive(Parser, Debug)]
#[command(name = "verbatim")]
#[command(about = "Detect verbatim text reuse of a source corpus in candidate documents")]
#[command(version)]
struct Args {
    /// Candidate files, or directories scanned for *.txt files
    #[arg(required = true)]
    candidates: Vec<PathBuf>,

    /// Source corpus: JSON array of {topic, content} objects or a directory of *.txt files
    #[arg(long, short)]
    sources: PathBuf,

    /// Detector configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pattern extraction mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Character n-gram size (implies n-gram mode)
    #[arg(long)]
    ngram_size: Option<usize>,

    /// Maximum matches kept per candidate
    #[arg(long)]
    max_matches: Option<usize>,

    /// Source attribution when several sources share a pattern
    #[arg(long, value_enum)]
    attribution: Option<AttributionArg>,

    /// Abort on first unreadable candidate
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Results output file path
    #[arg(long, default_value = "detection_results.json")]
    results_out: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Ngram,
    Phrases,
    Sliding,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AttributionArg {
    First,
    Last,
    All,
}

impl From<AttributionArg> for AttributionPolicy {
    fn from(arg: AttributionArg) -> Self {
        match arg {
            AttributionArg::First => AttributionPolicy::FirstSource,
            AttributionArg::Last => AttributionPolicy::LastSource,
            AttributionArg::All => AttributionPolicy::AllSources,
        }
    }
}

/// Per-candidate outcome written to the results file
#[derive(Serialize, Debug)]
struct CandidateReport {
    path: String,
    /// success or failed
    status: String,
    /// Opening characters of the candidate as read from disk
    text_preview: Option<String>,
    sources_checked: usize,
    risk_level: Option<RiskLevel>,
    statistics: Option<MatchStatistics>,
    result: Option<DetectionResult>,
    processing_time_ms: u64,
    error: Option<String>,
}

#[derive(Serialize, Debug)]
struct RunReport<'a> {
    /// Unix seconds when the run finished
    analysis_timestamp: u64,
    sources_path: String,
    sources_loaded: usize,
    config: &'a DetectorConfig,
    candidates: Vec<CandidateReport>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let config = resolve_config(&args).await?;
    let detector = Arc::new(Detector::new(config).context("Invalid detector configuration")?);
    info!(config = ?detector.config(), "Detector ready");

    let corpus = Arc::new(load_corpus(&args.sources).await?);
    if corpus.is_empty() {
        warn!("Source corpus {} is empty", args.sources.display());
    }

    let candidates = discover_candidates(&args.candidates)?;
    info!("Checking {} candidates against {} sources", candidates.len(), corpus.len());

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(candidates.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );
        bar
    };

    // WHY: each detection is pure CPU work with its own automaton; bound parallelism by cores
    let mut outcomes = stream::iter(candidates)
        .map(|path| {
            let detector = Arc::clone(&detector);
            let corpus = Arc::clone(&corpus);
            async move {
                let start = Instant::now();
                let outcome = check_candidate(&path, detector, corpus).await;
                (path, outcome, start.elapsed().as_millis() as u64)
            }
        })
        .buffer_unordered(num_cpus::get().max(1));

    let mut reports = Vec::new();
    while let Some((path, outcome, elapsed_ms)) = outcomes.next().await {
        let report = match outcome {
            Ok((preview, result)) => CandidateReport {
                path: path.display().to_string(),
                status: "success".to_string(),
                text_preview: Some(preview),
                sources_checked: corpus.len(),
                risk_level: Some(RiskLevel::from_score(result.score)),
                statistics: Some(MatchStatistics::from(&result)),
                result: Some(result),
                processing_time_ms: elapsed_ms,
                error: None,
            },
            Err(e) if args.fail_fast => {
                progress.abandon();
                return Err(e);
            }
            Err(e) => {
                warn!("Failed to check {}: {:#}", path.display(), e);
                CandidateReport {
                    path: path.display().to_string(),
                    status: "failed".to_string(),
                    text_preview: None,
                    sources_checked: corpus.len(),
                    risk_level: None,
                    statistics: None,
                    result: None,
                    processing_time_ms: elapsed_ms,
                    error: Some(format!("{e:#}")),
                }
            }
        };
        progress.set_message(report.path.clone());
        progress.inc(1);
        reports.push(report);
    }
    progress.finish_and_clear();

    reports.sort_by(|a, b| a.path.cmp(&b.path));
    print_summary(&reports);

    let analysis_timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    let run = RunReport {
        analysis_timestamp,
        sources_path: args.sources.display().to_string(),
        sources_loaded: corpus.len(),
        config: detector.config(),
        candidates: reports,
    };
    write_results(&args.results_out, &run).await?;

    Ok(())
}

/// Start from the config file (or defaults) and apply CLI overrides
async fn resolve_config(args: &Args) -> Result<DetectorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => DetectorConfig::default(),
    };

    match (args.mode, args.ngram_size) {
        (Some(ModeArg::Phrases), _) => config.extraction = ExtractionMode::phrases(),
        (Some(ModeArg::Sliding), _) => config.extraction = ExtractionMode::sliding_window(),
        (Some(ModeArg::Ngram), n) => {
            config.extraction = ExtractionMode::NGram {
                n: n.unwrap_or(ExtractionMode::DEFAULT_NGRAM_SIZE),
            }
        }
        (None, Some(n)) => config.extraction = ExtractionMode::NGram { n },
        (None, None) => {}
    }
    if let Some(max) = args.max_matches {
        config.max_reported_matches = max;
    }
    if let Some(attribution) = args.attribution {
        config.attribution = attribution.into();
    }

    Ok(config)
}

/// Read one candidate and run a detection on the blocking pool
///
/// Returns a preview of the raw text along with the result.
async fn check_candidate(
    path: &Path,
    detector: Arc<Detector>,
    corpus: Arc<Vec<SourceEntry>>,
) -> Result<(String, DetectionResult)> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read candidate {}", path.display()))?;

    let preview = text_preview(&text, PREVIEW_CHARS);
    let result = tokio::task::spawn_blocking(move || detector.detect(&text, &corpus))
        .await
        .context("Detection task failed")?;
    Ok((preview, result))
}

fn print_summary(reports: &[CandidateReport]) {
    println!("verbatim v{} - checked {} candidates", env!("CARGO_PKG_VERSION"), reports.len());

    for report in reports {
        match (&report.result, report.risk_level) {
            (Some(result), Some(risk)) => match &result.error {
                None => println!(
                    "  {}: {:.1}% similar, {} risk, {} matches",
                    report.path,
                    result.score * 100.0,
                    risk,
                    result.total_matches
                ),
                Some(error) => println!("  {}: skipped ({})", report.path, error),
            },
            _ => println!(
                "  {}: failed ({})",
                report.path,
                report.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

async fn write_results(path: &Path, run: &RunReport<'_>) -> Result<()> {
    let content = serde_json::to_string_pretty(run)?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    info!("Results written to {}", path.display());
    Ok(())
}
