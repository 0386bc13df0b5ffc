//! Benchmark for description cleaning, TF-IDF fitting and SVM training
//!
//! Run with: cargo bench --bench training_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::SeedableRng;

use spendwise::pipeline::{build_pipeline, normalize, train, LabeledExample, PipelineConfig, TrainingConfig};

const MERCHANTS: [(&str, &str); 12] = [
    ("zomato", "Food"),
    ("swiggy", "Food"),
    ("dominos", "Food"),
    ("myntra", "Shopping"),
    ("amazon", "Shopping"),
    ("flipkart", "Shopping"),
    ("uber", "Travel"),
    ("ola", "Travel"),
    ("irctc", "Travel"),
    ("airtel", "Bills"),
    ("netflix", "Entertainment"),
    ("spotify", "Entertainment"),
];

const FILLER: [&str; 8] = ["order", "payment", "txn", "debited", "upi", "ref", "INR", "Rs."];

/// Generate synthetic labeled descriptions with noise tokens and reference ids
fn generate_examples(n_rows: usize, seed: u64) -> Vec<LabeledExample> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    (0..n_rows)
        .map(|_| {
            let (merchant, category) = MERCHANTS[rng.gen_range(0..MERCHANTS.len())];
            let filler = FILLER[rng.gen_range(0..FILLER.len())];
            let reference: u32 = rng.gen_range(1_000..999_999);
            LabeledExample::new(
                format!("{} {} {} {}", merchant.to_uppercase(), filler, reference, filler),
                category,
            )
        })
        .collect()
}

/// Benchmark normalization throughput
fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for n_rows in [1_000, 10_000] {
        let examples = generate_examples(n_rows, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::new("descriptions", n_rows), &examples, |b, examples| {
            b.iter(|| {
                for e in examples {
                    black_box(normalize(Some(&e.description)));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark fitting the pipeline on pre-cleaned text
fn benchmark_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_fit");
    group.sample_size(20);

    for n_rows in [500, 2_000, 5_000] {
        let examples = generate_examples(n_rows, 42);
        let texts: Vec<String> = examples
            .iter()
            .map(|e| normalize(Some(&e.description)))
            .collect();
        let labels: Vec<String> = examples.iter().map(|e| e.category.clone()).collect();

        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(
            BenchmarkId::new("tfidf_svm", n_rows),
            &(&texts, &labels),
            |b, (texts, labels)| {
                b.iter(|| {
                    let mut pipeline = build_pipeline(&PipelineConfig::default());
                    let _ = pipeline.fit(black_box(texts), black_box(labels));
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the full training flow including split and evaluation
fn benchmark_train(c: &mut Criterion) {
    let mut group = c.benchmark_group("train_with_holdout");
    group.sample_size(10);

    let examples = generate_examples(2_000, 7);
    let config = TrainingConfig::default();

    group.bench_function("2000_rows", |b| {
        b.iter(|| {
            let _ = train(black_box(&examples), black_box(&config));
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_normalize, benchmark_fit, benchmark_train);
criterion_main!(benches);
