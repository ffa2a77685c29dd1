use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lumen_core::scale::map_all;
use lumen_core::{catmull_rom_closed, dynamic_interval, values_by_interval, Point};

fn sample(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 * 0.013).sin() * 500.0 + i as f64 * 0.01).collect()
}

fn bench_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("ticks");
    for &n in &[1_000usize, 100_000usize] {
        let values = sample(n);
        group.bench_function(format!("dynamic_interval_{n}"), |b| {
            b.iter(|| black_box(dynamic_interval(black_box(&values))))
        });
        group.bench_function(format!("values_by_interval_{n}"), |b| {
            let interval = dynamic_interval(&values);
            b.iter(|| black_box(values_by_interval(interval, black_box(&values))))
        });
        group.bench_function(format!("map_all_{n}"), |b| {
            b.iter(|| black_box(map_all(black_box(&values), 20.0, 980.0)))
        });
    }
    group.finish();
}

fn bench_spline(c: &mut Criterion) {
    let ring: Vec<Point> = (0..365)
        .map(|i| {
            let a = i as f64 / 365.0 * std::f64::consts::TAU;
            Point::new(a.cos() * 200.0, a.sin() * 200.0)
        })
        .collect();
    c.bench_function("catmull_rom_closed_365", |b| b.iter(|| black_box(catmull_rom_closed(black_box(&ring)))));
}

criterion_group!(benches, bench_ticks, bench_spline);
criterion_main!(benches);
