use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mandelbrot_explorer::core::actions::render_job::render_job_parallel_rayon::render_job_parallel_rayon;
use mandelbrot_explorer::core::arithmetic::ArbitraryComplex;
use mandelbrot_explorer::core::data::complex::Complex;
use mandelbrot_explorer::core::data::render_job::RenderJob;
use mandelbrot_explorer::core::data::viewport::Viewport;
use mandelbrot_explorer::core::fractals::mandelbrot::algorithm::{MandelbrotAlgorithm, DEFAULT_ESCAPE_RADIUS};
use mandelbrot_explorer::ExplorerConfig;

fn bench_config() -> ExplorerConfig {
    ExplorerConfig {
        width: 320,
        height: 240,
        max_iterations: 500,
        ..ExplorerConfig::default()
    }
}

fn job_at(center: Complex, scale: f64, config: &ExplorerConfig) -> RenderJob {
    let viewport = Viewport::new(center, scale, config.width, config.height, config.guard_bits).unwrap();
    RenderJob::new(1, viewport, config.max_iterations, config).unwrap()
}

fn bench_render_job(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_job");
    group.sample_size(10);

    let config = bench_config();
    let native = job_at(Complex::new(-0.5, 0.0), 80.0, &config);
    group.bench_function("native_reset_view", |b| {
        b.iter(|| render_job_parallel_rayon(black_box(&native)).unwrap())
    });

    // Just past the native tier.
    let arbitrary = job_at(Complex::new(-0.743_643_887, 0.131_825_904), 2f64.powi(50), &config);
    group.bench_function("arbitrary_seahorse_valley", |b| {
        b.iter(|| render_job_parallel_rayon(black_box(&arbitrary)).unwrap())
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let algorithm = MandelbrotAlgorithm::new(1000, DEFAULT_ESCAPE_RADIUS).unwrap();
    let point = Complex::new(-0.743_643_887, 0.131_825_904);

    group.bench_function("native", |b| b.iter(|| algorithm.evaluate(black_box(&point))));

    for bits in [64, 128, 256] {
        let arbitrary = ArbitraryComplex::from_native(point, bits);
        group.bench_function(format!("arbitrary_{}_bits", bits), |b| {
            b.iter(|| algorithm.evaluate(black_box(&arbitrary)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render_job, bench_evaluate);
criterion_main!(benches);
