use br_core::color::Rgba;
use br_core::config::RenderParams;
use br_glyph::glyph::glyph_for_mask;
use br_glyph::raster::rasterize;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_rasterize(c: &mut Criterion) {
    // 40 lines x 32 glyphs, every mask represented
    let lines: Vec<String> = (0..40u32)
        .map(|row| {
            (0..32u32)
                .map(|col| glyph_for_mask(((row * 32 + col) % 256) as u8))
                .collect()
        })
        .collect();
    let params = RenderParams::default();

    c.bench_function("rasterize_40x32", |b| {
        b.iter(|| rasterize(black_box(&lines), Rgba::BLACK, &params));
    });
}

criterion_group!(benches, bench_rasterize);
criterion_main!(benches);
