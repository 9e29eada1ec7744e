//! Criterion benchmarks for the autofaq TF-IDF matcher.
//!
//! Covers text analysis, model fitting, and batched inference.

use std::hint::black_box;

use autofaq::analysis::analyzer::{Analyzer, StandardAnalyzer, analyzer_by_name};
use autofaq::dataset::FaqPair;
use autofaq::engine::{IntentModel, Scoring, TfIdfMatcher};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const WORDS: &[&str] = &[
    "school", "library", "open", "hours", "tuition", "fees", "parking", "lunch", "bus",
    "schedule", "exam", "grade", "teacher", "class", "holiday", "uniform", "sports", "club",
    "enrol", "transfer", "report", "card", "homework", "office",
];

/// Generate FAQ rows with pseudo-random questions.
fn generate_faq(count: usize) -> Vec<FaqPair> {
    (0..count)
        .map(|i| {
            let length = 4 + (i % 6);
            let question: Vec<&str> = (0..length)
                .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()])
                .collect();
            FaqPair::new(question.join(" "), format!("Answer {}", i % (count / 3 + 1)))
        })
        .collect()
}

fn generate_utterances(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            (0..5)
                .map(|j| WORDS[(i * 11 + j * 5) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Benchmark text analysis.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let analyzer = StandardAnalyzer::new().unwrap();
    let texts = generate_utterances(100);

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("analyze_batch", |b| {
        b.iter(|| {
            for text in &texts {
                let tokens: Vec<_> = analyzer.analyze(black_box(text)).unwrap().collect();
                black_box(tokens);
            }
        })
    });

    group.finish();
}

/// Benchmark fitting the matcher on datasets of increasing size.
fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    group.sample_size(20);

    for size in [100, 1_000, 5_000] {
        let pairs = generate_faq(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &pairs, |b, pairs| {
            b.iter(|| {
                let analyzer = analyzer_by_name("standard").unwrap();
                black_box(TfIdfMatcher::fit(pairs, analyzer, Scoring::Nearest).unwrap())
            })
        });
    }

    group.finish();
}

/// Benchmark batched inference with both scoring modes.
fn bench_infer(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer");

    let pairs = generate_faq(1_000);
    let utterances = generate_utterances(64);

    for scoring in [Scoring::Nearest, Scoring::Prototype] {
        let analyzer = analyzer_by_name("standard").unwrap();
        let matcher = TfIdfMatcher::fit(&pairs, analyzer, scoring).unwrap();

        group.throughput(Throughput::Elements(utterances.len() as u64));
        group.bench_function(format!("{scoring:?}").to_lowercase(), |b| {
            b.iter(|| black_box(matcher.infer(black_box(&utterances)).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_text_analysis, bench_fit, bench_infer);
criterion_main!(benches);
