use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::path::PathBuf;
use verbatim::{normalize_text, ngrams, Automaton, Detector, DetectorConfig, ExtractionMode, SourceEntry};

const TEST_SIZES: &[(usize, &str)] = &[
    (1_000, "small"),
    (10_000, "medium"),
    (100_000, "large"),
];

const BASE_SENTENCES: &[&str] = &[
    "Finite automata recognize regular languages.",
    "A failure link points to the longest proper suffix that is also a prefix.",
    "Lexical analysis splits source text into tokens.",
    "Every state keeps the patterns that end at it.",
    "Breadth first order guarantees shallower links exist first.",
    "Coverage counts each character position at most once.",
];

fn generate_text(char_count: usize, offset: usize) -> String {
    let mut text = String::with_capacity(char_count + 80);
    let mut index = offset;
    while text.len() < char_count {
        text.push_str(BASE_SENTENCES[index % BASE_SENTENCES.len()]);
        text.push(' ');
        index += 1;
    }
    text.truncate(char_count);
    text
}

/// Optional real corpus: a JSON array of sources named by VERBATIM_BENCH_CORPUS
fn load_bench_corpus() -> Option<Vec<SourceEntry>> {
    let path = PathBuf::from(std::env::var("VERBATIM_BENCH_CORPUS").ok()?);
    let content = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(corpus) => Some(corpus),
        Err(e) => {
            eprintln!("Ignoring bench corpus {}: {}", path.display(), e);
            None
        }
    }
}

fn synthetic_corpus() -> Vec<SourceEntry> {
    (0..BASE_SENTENCES.len())
        .map(|i| SourceEntry::new(format!("source-{i}"), generate_text(2_000, i)))
        .collect()
}

fn naive_scan(patterns: &[&str], text: &str) -> usize {
    patterns
        .iter()
        .map(|pattern| {
            text.char_indices()
                .filter(|&(start, _)| text[start..].starts_with(pattern))
                .count()
        })
        .sum()
}

fn bench_build(c: &mut Criterion) {
    let source = normalize_text(&generate_text(20_000, 0));
    let patterns: Vec<&str> = ngrams(&source, ExtractionMode::DEFAULT_NGRAM_SIZE).into_iter().collect();

    let mut group = c.benchmark_group("automaton_build");
    group.throughput(Throughput::Elements(patterns.len() as u64));
    group.bench_function("ngram_patterns", |b| {
        b.iter(|| black_box(Automaton::build(black_box(&patterns))));
    });
    group.finish();
}

fn bench_scan_vs_naive(c: &mut Criterion) {
    let source = normalize_text(&generate_text(5_000, 2));
    let patterns: Vec<&str> = ngrams(&source, ExtractionMode::DEFAULT_NGRAM_SIZE).into_iter().collect();
    let automaton = Automaton::build(&patterns);

    for &(size, size_name) in TEST_SIZES {
        let text = normalize_text(&generate_text(size, 1));

        let mut group = c.benchmark_group(format!("scan_{}", size_name));
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_function("automaton", |b| {
            b.iter(|| black_box(automaton.find_iter(black_box(&text)).count()));
        });

        // Quadratic in pattern count; only the small input stays tractable
        if size <= 1_000 {
            group.bench_function("naive", |b| {
                b.iter(|| black_box(naive_scan(&patterns, black_box(&text))));
            });
        }

        group.finish();
    }
}

fn bench_detect(c: &mut Criterion) {
    dotenvy::dotenv().ok();

    let corpus = load_bench_corpus().unwrap_or_else(synthetic_corpus);
    let candidate = generate_text(10_000, 3);
    let modes = [
        ("ngram", ExtractionMode::NGram { n: ExtractionMode::DEFAULT_NGRAM_SIZE }),
        ("phrases", ExtractionMode::phrases()),
        ("sliding_window", ExtractionMode::sliding_window()),
    ];

    let mut group = c.benchmark_group("detect");
    group.sample_size(20);
    group.throughput(Throughput::Bytes(candidate.len() as u64));

    for (name, extraction) in modes {
        let config = DetectorConfig { extraction, ..DetectorConfig::default() };
        let detector = Detector::new(config).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(detector.detect(black_box(&candidate), &corpus)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_scan_vs_naive, bench_detect);
criterion_main!(benches);
