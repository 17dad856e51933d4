//! Sprite encoding and decoding.
//!
//! Encoding turns a [`Sprite`] into an [`IndexRecord`] (geometry + palette)
//! and one palette-slot byte per pixel, emitted in the sprite's scan order.
//! Decoding maps every byte back through the record's palette.

use log::debug;

use crate::error::CodecError;
use crate::index::{self, IndexRecord};

use super::{Palette, RGB_MASK, Sprite};

/// Encoded form of one sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSprite {
	/// Metadata record destined for `index.dat`
	pub record: IndexRecord,

	/// Palette slot of every pixel, in scan order
	pub pixels: Vec<u8>,
}

impl EncodedSprite {
	/// Builds the `{id}.dat` payload: index offset header followed by pixel bytes
	pub fn to_payload(&self, index_offset: u16) -> Vec<u8> {
		let mut payload = Vec::with_capacity(index::PAYLOAD_HEADER_SIZE + self.pixels.len());
		payload.extend_from_slice(&index::write_payload_header(index_offset));
		payload.extend_from_slice(&self.pixels);
		payload
	}
}

/// Encodes a sprite, building its palette first.
///
/// # Errors
///
/// Returns [`CodecError::PaletteOverflow`] if the sprite uses more than 255
/// distinct colors (background included). No bytes are produced in that case.
pub fn encode(sprite: &Sprite) -> Result<EncodedSprite, CodecError> {
	let palette = Palette::build(sprite.width(), sprite.height(), sprite.pixels())?;
	Ok(encode_with_palette(sprite, &palette))
}

/// Encodes a sprite against an already built palette.
///
/// # Panics
///
/// Panics if a pixel's color is missing from `palette`. The palette must have
/// been built over the same pixels, e.g. with [`Palette::build`].
pub fn encode_with_palette(sprite: &Sprite, palette: &Palette) -> EncodedSprite {
	let width = sprite.width() as usize;
	let pixels = sprite.pixels();

	let mut out = Vec::with_capacity(pixels.len());
	sprite.format.for_each_coord(width, sprite.height() as usize, |x, y| {
		let rgb = pixels[y * width + x] & RGB_MASK;
		let Some(slot) = palette.slot_of(rgb) else {
			panic!("color {rgb:06X} of sprite {} is missing from its palette", sprite.id);
		};
		out.push(slot);
	});

	debug!(
		"Encoded sprite {}: {}x{}, {} colors, {}",
		sprite.id,
		sprite.width(),
		sprite.height(),
		palette.len(),
		sprite.format
	);

	EncodedSprite {
		record: IndexRecord {
			resize_width: sprite.resize_width,
			resize_height: sprite.resize_height,
			colors: palette.extra_colors().to_vec(),
			offset_x: sprite.offset_x,
			offset_y: sprite.offset_y,
			width: sprite.width(),
			height: sprite.height(),
			format: sprite.format.to_u8(),
		},
		pixels: out,
	}
}

/// Decodes scan-ordered pixel bytes against their index record.
///
/// # Errors
///
/// Returns [`CodecError::PixelCountMismatch`] if `pixels` is not
/// `width * height` long, and [`CodecError::PaletteIndexOutOfRange`] if a byte
/// addresses a slot the record's palette does not have.
pub fn decode(id: u32, record: &IndexRecord, pixels: &[u8]) -> Result<Sprite, CodecError> {
	let width = record.width as usize;
	let height = record.height as usize;
	let expected = width * height;
	if pixels.len() != expected {
		return Err(CodecError::PixelCountMismatch {
			expected,
			actual: pixels.len(),
		});
	}

	let palette_len = record.palette_len();
	if let Some(&index) = pixels.iter().find(|&&slot| slot as usize >= palette_len) {
		return Err(CodecError::PaletteIndexOutOfRange {
			index,
			palette_len,
		});
	}

	let mut grid = vec![Palette::BACKGROUND; expected];
	let mut bytes = pixels.iter();
	let format = record.scan_order();
	format.for_each_coord(width, height, |x, y| {
		if let Some(&slot) = bytes.next() {
			grid[y * width + x] = record.color(slot).unwrap_or(Palette::BACKGROUND);
		}
	});

	debug!("Decoded sprite {id}: {width}x{height}, {palette_len} colors, {format}");

	Ok(Sprite::new(id, record.width, record.height, grid)?
		.with_resize(record.resize_width, record.resize_height)
		.with_offsets(record.offset_x, record.offset_y)
		.with_format(format))
}

/// Decodes a complete `{id}.dat` payload, skipping its index offset header
pub fn decode_payload(id: u32, record: &IndexRecord, payload: &[u8]) -> Result<Sprite, CodecError> {
	if payload.len() < index::PAYLOAD_HEADER_SIZE {
		return Err(CodecError::PayloadTooShort {
			expected: index::PAYLOAD_HEADER_SIZE,
			actual: payload.len(),
		});
	}
	decode(id, record, &payload[index::PAYLOAD_HEADER_SIZE..])
}
