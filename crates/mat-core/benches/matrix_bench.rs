//! Benchmarks for multiplication, cofactor determinants and elimination.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use mat_core::Matrix;

/// Generates a deterministic, well-conditioned square matrix.
fn sample_matrix(n: usize) -> Matrix {
    let mut m = Matrix::allocate(n, n).unwrap();
    let values: Vec<f64> = (0..n * n)
        .map(|i| {
            let (row, col) = (i / n, i % n);
            if row == col {
                n as f64 + 1.0
            } else {
                ((i * 7 + 3) % 11) as f64 / 11.0
            }
        })
        .collect();
    m.fill(&values).unwrap();
    m
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");

    for size in [8, 32, 128] {
        let a = sample_matrix(size);
        let b = sample_matrix(size);

        group.bench_with_input(BenchmarkId::new("dense", size), &size, |bench, _| {
            bench.iter(|| black_box(a.multiply(&b).unwrap()));
        });
    }

    group.finish();
}

fn bench_determinant(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinant");

    // cofactor expansion is factorial; keep sizes small
    for size in [3, 5, 7] {
        let m = sample_matrix(size);
        group.bench_with_input(BenchmarkId::new("cofactor", size), &size, |bench, _| {
            bench.iter(|| black_box(m.determinant().unwrap()));
        });
    }

    group.finish();
}

fn bench_elimination(c: &mut Criterion) {
    let mut group = c.benchmark_group("elimination");

    for size in [8, 32, 128] {
        let m = sample_matrix(size);
        group.bench_with_input(BenchmarkId::new("gaussian", size), &size, |bench, _| {
            bench.iter(|| black_box(m.gaussian_eliminate()));
        });
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let m = sample_matrix(128);
    c.bench_function("codec/roundtrip_128", |bench| {
        bench.iter(|| {
            let bytes = m.to_bytes().unwrap();
            black_box(Matrix::from_bytes(&bytes).unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_multiply,
    bench_determinant,
    bench_elimination,
    bench_codec
);
criterion_main!(benches);
