use criterion::{black_box, criterion_group, criterion_main, Criterion};
use punchkit_core::{GridDivisionConfig, Hole, Panel};
use punchkit_pattern::{derive_grid_lines, filter_holes, generate_default_pattern};

fn dense_holes(panel: &Panel, pitch: f64) -> Vec<Hole> {
    let mut holes = Vec::new();
    let mut x = pitch;
    while x < panel.length_mm {
        let mut y = pitch;
        while y < panel.height_mm {
            holes.push(Hole::new(x, y, 3.0));
            y += pitch;
        }
        x += pitch;
    }
    holes
}

fn bench_grid_derivation(c: &mut Criterion) {
    let panel = Panel::new(3000.0, 2000.0, 3.0);
    let config = GridDivisionConfig {
        enabled: true,
        vertical_count: 12,
        horizontal_count: 8,
        horizontal_spacings: Vec::new(),
        vertical_spacings: Vec::new(),
        ..GridDivisionConfig::default()
    };

    c.bench_function("derive_grid_lines_12x8", |b| {
        b.iter(|| {
            let lines = derive_grid_lines(black_box(&panel), black_box(&config));
            black_box(lines.len());
        });
    });
}

fn bench_hole_filtering(c: &mut Criterion) {
    let panel = Panel::new(3000.0, 2000.0, 3.0);
    let holes = dense_holes(&panel, 10.0);
    let config = GridDivisionConfig {
        enabled: true,
        vertical_count: 6,
        horizontal_count: 4,
        horizontal_spacings: Vec::new(),
        vertical_spacings: Vec::new(),
        ..GridDivisionConfig::default()
    };
    let lines = derive_grid_lines(&panel, &config);

    c.bench_function("filter_holes_60k_8_lines", |b| {
        b.iter(|| {
            let kept = filter_holes(black_box(&holes), black_box(&lines), black_box(5.0));
            black_box(kept.len());
        });
    });
}

fn bench_default_generation(c: &mut Criterion) {
    let panel = Panel::new(2000.0, 1200.0, 3.0);

    c.bench_function("generate_default_pattern_2000x1200", |b| {
        b.iter(|| {
            let holes = generate_default_pattern(black_box(&panel), black_box(10.0), 0.0);
            black_box(holes.len());
        });
    });
}

criterion_group!(
    benches,
    bench_grid_derivation,
    bench_hole_filtering,
    bench_default_generation
);
criterion_main!(benches);
