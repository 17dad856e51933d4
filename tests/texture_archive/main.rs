//! Integration tests for `texpak-rs`

mod images;
mod roundtrip;
mod store;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use texpak_rs::prelude::*;

/// Seeded generator so failures reproduce
pub(crate) fn rng(seed: u64) -> SmallRng {
	SmallRng::seed_from_u64(seed)
}

/// Builds a sprite whose pixels are drawn from `colors` random RGB values
pub(crate) fn random_sprite(rng: &mut SmallRng, id: u32, colors: usize) -> Sprite {
	let width = rng.random_range(1..=48u16);
	let height = rng.random_range(1..=48u16);
	let choices: Vec<u32> = (0..colors).map(|_| rng.random::<u32>() & 0x00FF_FFFF).collect();
	let pixels = (0..width as usize * height as usize).map(|_| choices[rng.random_range(0..colors)]).collect();

	let format = if rng.random_bool(0.5) { ScanOrder::Vertical } else { ScanOrder::Horizontal };
	Sprite::new(id, width, height, pixels)
		.unwrap()
		.with_format(format)
		.with_resize(rng.random_range(1..=128), rng.random_range(1..=128))
		.with_offsets(rng.random(), rng.random())
}
