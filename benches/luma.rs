use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgba, RgbaImage};
use zbar_scan::preprocess;

fn bench_to_luma(c: &mut Criterion) {
    let rgba = DynamicImage::ImageRgba8(RgbaImage::from_fn(1280, 720, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    }));
    let gray = DynamicImage::ImageLuma8(rgba.to_luma8());

    c.bench_function("to_luma rgba 1280x720", |b| {
        b.iter(|| preprocess::to_luma(black_box(&rgba)).unwrap().len())
    });

    c.bench_function("to_luma gray passthrough 1280x720", |b| {
        b.iter(|| preprocess::to_luma(black_box(&gray)).unwrap().len())
    });
}

criterion_group!(benches, bench_to_luma);
criterion_main!(benches);
