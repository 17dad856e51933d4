//! Benchmark helper utilities for texpak-rs
//!
//! Generates synthetic sprites so the benchmarks need no asset files.

use texpak_types::texture::Sprite;

/// Generates a sprite using `colors` distinct non-background colors.
///
/// Pixels cycle through the colors with a stride so neighbouring pixels
/// differ, which keeps the palette lookup honest.
pub fn generate_sprite(id: u32, width: u16, height: u16, colors: u32) -> Sprite {
	let colors = colors.clamp(1, 254);
	let pixels = (0..width as u32 * height as u32)
		.map(|i| {
			let slot = (i * 31 + i / width as u32) % colors + 1;
			slot.wrapping_mul(0x0001_0307) & 0x00FF_FFFF
		})
		.collect();

	Sprite::new(id, width, height, pixels).expect("pixel count matches dimensions")
}

/// Generates `count` sprites with consecutive ids
pub fn generate_sprite_set(count: u32, width: u16, height: u16, colors: u32) -> Vec<Sprite> {
	(0..count).map(|id| generate_sprite(id, width, height, colors)).collect()
}
