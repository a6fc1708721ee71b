use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ternary_heatmap::{
    heatmap, heatmap_raster, polygon_iterator, simplex_iterator, ColormapRegistry, HeatmapData,
    HeatmapOptions, RasterSurfaceConfig, RecordingSurface, Style,
};

const SCALE: u32 = 50;

fn ramp(scale: u32) -> HeatmapData {
    HeatmapData::from_pairs(
        scale,
        simplex_iterator(scale, true).map(|p| ((p.i, p.j), Some((p.i * p.j) as f64))),
    )
    .unwrap()
}

fn bench_polygon_iteration(c: &mut Criterion) {
    let data = ramp(SCALE);
    let mut group = c.benchmark_group("polygon_iterator");
    for style in [Style::Triangular, Style::DualTriangular, Style::Hexagonal] {
        group.bench_function(style.name(), |b| {
            b.iter(|| polygon_iterator(black_box(&data), style, None).count())
        });
    }
    group.finish();
}

fn bench_recording(c: &mut Criterion) {
    let data = ramp(SCALE);
    let registry = ColormapRegistry::with_defaults();
    let opts = HeatmapOptions::new().style(Style::Hexagonal);
    c.bench_function("heatmap_recording_hexagonal", |b| {
        b.iter(|| {
            let mut surface = RecordingSurface::new();
            heatmap(black_box(&data), &opts, &registry, &mut surface).map(|s| s.commands().len())
        })
    });
}

fn bench_raster(c: &mut Criterion) {
    let data = ramp(SCALE);
    let registry = ColormapRegistry::with_defaults();
    let opts = HeatmapOptions::new();
    c.bench_function("heatmap_raster_triangular_500", |b| {
        b.iter(|| {
            heatmap_raster(
                black_box(&data),
                &opts,
                &registry,
                RasterSurfaceConfig::default(),
            )
            .map(|s| s.width())
        })
    });
}

criterion_group!(benches, bench_polygon_iteration, bench_recording, bench_raster);
criterion_main!(benches);
