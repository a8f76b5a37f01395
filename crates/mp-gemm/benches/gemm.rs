use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mp_gemm::{
    multiply_blocked, multiply_blocked_threaded, multiply_blocked_threaded_simd, multiply_naive,
    FillPattern, Matrix,
};
use ndarray::Array2;

const SIZE: usize = 256;
const BLOCK_SIZE: usize = 32;
const THREADS: usize = 4;

fn inputs() -> (Matrix<'static>, Matrix<'static>) {
    let pattern = |seed| FillPattern::Uniform {
        min: -1.0,
        max: 1.0,
        seed,
    };
    let a = Matrix::with_pattern(SIZE, SIZE, pattern(1)).unwrap();
    let b = Matrix::with_pattern(SIZE, SIZE, pattern(2)).unwrap();
    (a, b)
}

fn bench_variants(c: &mut Criterion) {
    let (a, b) = inputs();
    let mut group = c.benchmark_group("gemm");

    group.bench_function(BenchmarkId::new("naive", SIZE), |bench| {
        bench.iter(|| {
            let mut out = Matrix::zeros(SIZE, SIZE).unwrap();
            multiply_naive(&a, &b, &mut out).unwrap();
            out
        })
    });

    group.bench_function(BenchmarkId::new("blocked", SIZE), |bench| {
        bench.iter(|| {
            let mut out = Matrix::zeros(SIZE, SIZE).unwrap();
            multiply_blocked(&a, &b, &mut out, BLOCK_SIZE).unwrap();
            out
        })
    });

    group.bench_function(BenchmarkId::new("blocked_threaded", SIZE), |bench| {
        bench.iter(|| {
            let mut out = Matrix::zeros(SIZE, SIZE).unwrap();
            multiply_blocked_threaded(&a, &b, &mut out, BLOCK_SIZE, THREADS).unwrap();
            out
        })
    });

    group.bench_function(BenchmarkId::new("blocked_threaded_simd", SIZE), |bench| {
        bench.iter(|| {
            let mut out = Matrix::zeros(SIZE, SIZE).unwrap();
            multiply_blocked_threaded_simd(&a, &b, &mut out, BLOCK_SIZE, THREADS).unwrap();
            out
        })
    });

    let na = Array2::from_shape_vec((SIZE, SIZE), a.as_slice().to_vec()).unwrap();
    let nb = Array2::from_shape_vec((SIZE, SIZE), b.as_slice().to_vec()).unwrap();
    group.bench_function(BenchmarkId::new("ndarray", SIZE), |bench| {
        bench.iter(|| na.dot(&nb))
    });

    group.finish();
}

criterion_group!(benches, bench_variants);
criterion_main!(benches);
