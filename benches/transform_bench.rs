use criterion::{Criterion, criterion_group, criterion_main};
use pane_rs::core::{Color, PaneKey};
use pane_rs::indicator::{
    ColorMode, IndicatorOutput, SeriesDescriptor, SeriesRole, StyleOverrides, Thresholds,
    transform,
};
use pane_rs::surface::{RecordingSurface, SharedSurface};
use pane_rs::{IndicatorPane, TimeScaleSynchronizer};
use std::hint::black_box;

fn oscillator_output(len: usize, mode: ColorMode) -> IndicatorOutput {
    let mut output = IndicatorOutput {
        timestamps: (0..len as i64).map(|i| 1_700_000_000 + i * 60).collect(),
        ..IndicatorOutput::default()
    };
    let values: Vec<Option<f64>> = (0..len)
        .map(|i| {
            if i % 97 == 0 {
                None
            } else {
                Some(((i as f64) * 0.37).sin() * 0.2)
            }
        })
        .collect();
    output.data.insert("cvd".to_owned(), values);
    output.metadata.color_mode = mode;
    output.metadata.thresholds = Some(Thresholds {
        high: Some(0.05),
        low: Some(-0.05),
    });
    output
        .metadata
        .series_metadata
        .push(SeriesDescriptor::new("cvd", Color::rgb(0.2, 0.6, 1.0)).with_role(SeriesRole::Main));
    output
}

fn bench_threshold_transform_10k(c: &mut Criterion) {
    let output = oscillator_output(10_000, ColorMode::Threshold);
    let overrides = StyleOverrides::default();

    c.bench_function("threshold_transform_10k", |b| {
        b.iter(|| {
            let _ = transform(black_box(&output), black_box(&overrides), None);
        })
    });
}

fn bench_trend_transform_10k(c: &mut Criterion) {
    let output = oscillator_output(10_000, ColorMode::Trend);
    let overrides = StyleOverrides::default();

    c.bench_function("trend_transform_10k", |b| {
        b.iter(|| {
            let _ = transform(black_box(&output), black_box(&overrides), None);
        })
    });
}

fn bench_pane_apply_output_10k(c: &mut Criterion) {
    let output = oscillator_output(10_000, ColorMode::Threshold);
    let candle_times: Vec<i64> = output.timestamps.clone();

    let mut sync = TimeScaleSynchronizer::new();
    let surface = RecordingSurface::shared();
    let mut pane = IndicatorPane::mount(
        PaneKey::new("BTCUSDT", "cvd", 0),
        surface as SharedSurface,
        &mut sync,
    )
    .expect("mount");

    c.bench_function("pane_apply_output_10k", |b| {
        b.iter(|| {
            pane.apply_output(black_box(output.clone()), black_box(&candle_times))
                .expect("apply");
        })
    });
}

criterion_group!(
    benches,
    bench_threshold_transform_10k,
    bench_trend_transform_10k,
    bench_pane_apply_output_10k
);
criterion_main!(benches);
