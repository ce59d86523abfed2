use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spdp_compress::config::CompressionConfig;
use spdp_compress::{compress_batch, decompress_batch, max_compressed_len, Compressor};

fn sine_f32(n: usize) -> Vec<u8> {
    (0..n)
        .flat_map(|i| ((i as f32) * 0.001).sin().to_le_bytes())
        .collect()
}

fn bench_batch(c: &mut Criterion) {
    let data = sine_f32(1 << 18);
    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for level in [0u8, 4, 9] {
        let mut compressed = vec![0u8; max_compressed_len(data.len())];
        let csize = compress_batch(level, data.len(), &mut data.clone(), &mut compressed).unwrap();
        compressed.truncate(csize);

        group.bench_with_input(BenchmarkId::new("compress", level), &level, |b, &level| {
            let mut buf_in = data.clone();
            let mut buf_out = vec![0u8; max_compressed_len(data.len())];
            b.iter(|| {
                buf_in.copy_from_slice(&data);
                black_box(compress_batch(level, data.len(), &mut buf_in, &mut buf_out).unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("decompress", level), &level, |b, &level| {
            let mut buf_in = vec![0u8; data.len().max(csize)];
            let mut buf_out = vec![0u8; data.len()];
            b.iter(|| {
                buf_in[..csize].copy_from_slice(&compressed);
                black_box(decompress_batch(level, csize, &mut buf_in, &mut buf_out).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_container(c: &mut Criterion) {
    let nums: Vec<f64> = (0..1 << 17).map(|i| (i as f64 / 100.0).cos() * 1e3).collect();
    let compressor = Compressor::new(CompressionConfig {
        batch_size: 1 << 16,
        ..CompressionConfig::default()
    });
    let compressed = compressor.compress_numbers(&nums).unwrap();

    c.bench_function("container_compress_f64", |b| {
        b.iter(|| compressor.compress_numbers(black_box(&nums)).unwrap())
    });
    c.bench_function("container_decompress_f64", |b| {
        b.iter(|| {
            compressor
                .decompress_numbers::<f64>(black_box(&compressed.data))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_batch, bench_container);
criterion_main!(benches);
