use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dsio::{binary, text, LoadOptions, Matrix};
use rand::Rng;
use std::hint::black_box;
use tempfile::TempDir;

fn random_matrix(rows: usize, cols: usize) -> Matrix<f32> {
    let mut rng = rand::thread_rng();
    let data = (0..rows * cols).map(|_| rng.gen_range(-1e4f32..1e4)).collect();
    Matrix::from_vec(rows, cols, data).unwrap()
}

fn bench_binary(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let mut group = c.benchmark_group("binary");

    for rows in [1_000, 100_000] {
        let matrix = random_matrix(rows, 16);
        let path = dir.path().join(format!("bench_{rows}.dat"));
        group.throughput(Throughput::Bytes((matrix.len() * 4) as u64));

        group.bench_with_input(BenchmarkId::new("save", rows), &matrix, |b, matrix| {
            b.iter(|| binary::save(black_box(matrix), &path).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("load", rows), &path, |b, path| {
            b.iter(|| binary::load_as::<f32>(black_box(path), &LoadOptions::default()).unwrap())
        });
    }
    group.finish();
}

fn bench_text(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let mut group = c.benchmark_group("text");

    for rows in [1_000, 20_000] {
        let matrix = random_matrix(rows, 16);
        let path = dir.path().join(format!("bench_{rows}.txt"));
        group.throughput(Throughput::Elements(matrix.len() as u64));

        group.bench_with_input(BenchmarkId::new("save", rows), &matrix, |b, matrix| {
            b.iter(|| text::save(black_box(matrix), &path).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("load", rows), &path, |b, path| {
            b.iter(|| text::load_as::<f32>(black_box(path), &LoadOptions::default()).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_binary, bench_text);
criterion_main!(benches);
