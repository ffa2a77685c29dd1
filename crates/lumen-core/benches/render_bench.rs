use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lumen_core::plots::{draw_line_plot, XyOptions};
use lumen_core::{Dataset, Record, Result, Viewport};

fn build_series(n: usize) -> Dataset {
    (0..n)
        .map(|i| {
            let x = i as f64;
            let y = (i as f64 * 0.01).sin() * 10.0 + (i as f64 * 0.0001);
            Record::new().with("x", x).with("y", y)
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    for &n in &[1_000usize, 10_000usize] {
        group.bench_function(format!("line_{n}"), |b| {
            let data = build_series(n);
            let opts = XyOptions::default();
            b.iter(|| -> Result<()> {
                let mut vp = Viewport::new(800, 500)?;
                draw_line_plot(&mut vp, &data, "x", "y", &opts)?;
                black_box(vp.to_png_bytes()?);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
