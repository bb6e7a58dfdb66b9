use anomaly_detect::{
    BatchOutlierDetector, IqrModel, IsolationForest, SeasonalParameters, SeasonalStream,
    StreamProcessor, ZScoreDetector,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn seasonal_values(steps: usize, seed: u64) -> Vec<f64> {
    SeasonalStream::new(SeasonalParameters::default(), Some(seed))
        .unwrap()
        .generate(steps)
        .values
}

fn bench_zscore(c: &mut Criterion) {
    let mut group = c.benchmark_group("ZScore");
    let values = seasonal_values(2_000, 42);

    for &window in &[50usize, 100, 500] {
        group.bench_with_input(BenchmarkId::new("ingest", window), &values, |b, values| {
            b.iter(|| {
                let mut processor = StreamProcessor::new(ZScoreDetector::new(window, 3.0).unwrap());
                for &v in values {
                    black_box(processor.ingest(v).unwrap());
                }
            })
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("BatchOutlier");
    group.sample_size(10);
    let values = seasonal_values(500, 7);

    group.bench_function("isolation_forest_w100", |b| {
        b.iter(|| {
            let detector =
                BatchOutlierDetector::with_model(100, 0.05, IsolationForest::seeded(1)).unwrap();
            let mut processor = StreamProcessor::new(detector);
            processor.ingest_all(black_box(values.iter().copied()))
        })
    });

    group.bench_function("isolation_forest_w100_refit10", |b| {
        b.iter(|| {
            let detector = BatchOutlierDetector::with_model(100, 0.05, IsolationForest::seeded(1))
                .unwrap()
                .with_refit_every(10)
                .unwrap();
            let mut processor = StreamProcessor::new(detector);
            processor.ingest_all(black_box(values.iter().copied()))
        })
    });

    group.bench_function("iqr_w100", |b| {
        b.iter(|| {
            let detector =
                BatchOutlierDetector::with_model(100, 0.05, IqrModel::default()).unwrap();
            let mut processor = StreamProcessor::new(detector);
            processor.ingest_all(black_box(values.iter().copied()))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_zscore, bench_batch);
criterion_main!(benches);
