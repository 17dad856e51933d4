//! Benchmark suite for the sprite codec and archive assembly
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use texpak_benches::{generate_sprite, generate_sprite_set};
use texpak_types::archive::{assemble, scan};
use texpak_types::texture::{ScanOrder, codec, palette::Palette};

/// Benchmark palette construction at several color counts
fn bench_palette_build(c: &mut Criterion) {
	let mut group = c.benchmark_group("palette_build");

	for colors in [2, 64, 254] {
		let sprite = generate_sprite(0, 128, 128, colors);
		group.throughput(Throughput::Elements(sprite.pixel_count() as u64));
		group.bench_with_input(BenchmarkId::from_parameter(colors), &sprite, |b, sprite| {
			b.iter(|| Palette::build(sprite.width(), sprite.height(), black_box(sprite.pixels())));
		});
	}

	group.finish();
}

/// Benchmark encoding and decoding in both scan orders
fn bench_codec(c: &mut Criterion) {
	let mut group = c.benchmark_group("codec");

	for format in [ScanOrder::Horizontal, ScanOrder::Vertical] {
		let sprite = generate_sprite(0, 128, 128, 200).with_format(format);
		let encoded = codec::encode(&sprite).unwrap();
		group.throughput(Throughput::Elements(sprite.pixel_count() as u64));

		group.bench_with_input(BenchmarkId::new("encode", format), &sprite, |b, sprite| {
			b.iter(|| codec::encode(black_box(sprite)));
		});

		group.bench_with_input(BenchmarkId::new("decode", format), &encoded, |b, encoded| {
			b.iter(|| codec::decode(0, &encoded.record, black_box(&encoded.pixels)));
		});
	}

	group.finish();
}

/// Benchmark whole-archive assembly and scanning
fn bench_archive(c: &mut Criterion) {
	let mut group = c.benchmark_group("archive");

	for count in [16, 128] {
		let sprites = generate_sprite_set(count, 64, 64, 32);
		let archive = assemble(&sprites).unwrap();
		group.throughput(Throughput::Elements(count as u64));

		group.bench_with_input(BenchmarkId::new("assemble", count), &sprites, |b, sprites| {
			b.iter(|| assemble(black_box(sprites)));
		});

		group.bench_with_input(BenchmarkId::new("scan", count), &archive, |b, archive| {
			b.iter(|| scan(black_box(archive)));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_palette_build, bench_codec, bench_archive);
criterion_main!(benches);
