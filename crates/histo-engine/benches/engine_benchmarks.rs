//! Benchmarks for the histogram engine hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use histo_common::PixelBuffer;
use histo_engine::{compute_histogram, extract_dominant_colors};

fn test_image(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            data.push(((x * 255) / width) as u8);
            data.push(((y * 255) / height) as u8);
            data.push(((x ^ y) % 256) as u8);
        }
    }
    PixelBuffer::new(width, height, data).unwrap()
}

fn bench_histogram(c: &mut Criterion) {
    let small = test_image(256, 158);
    let large = test_image(1920, 1187);

    c.bench_function("histogram_256x158_smoothed", |b| {
        b.iter(|| compute_histogram(black_box(&small), 256, 0.7).unwrap())
    });
    c.bench_function("histogram_1920x1187_smoothed", |b| {
        b.iter(|| compute_histogram(black_box(&large), 256, 0.7).unwrap())
    });
    c.bench_function("histogram_1920x1187_raw", |b| {
        b.iter(|| compute_histogram(black_box(&large), 256, 0.0).unwrap())
    });
}

fn bench_dominant(c: &mut Criterion) {
    let large = test_image(1920, 1187);
    c.bench_function("dominant_colors_1920x1187", |b| {
        b.iter(|| extract_dominant_colors(black_box(&large), 5).unwrap())
    });
}

criterion_group!(benches, bench_histogram, bench_dominant);
criterion_main!(benches);
