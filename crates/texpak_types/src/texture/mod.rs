//! Palette-indexed sprite textures.
//!
//! A sprite is a small RGB bitmap with at most 255 distinct colors. Slot 0 of
//! its palette is the implicit background color `0x000000` and is never
//! written out; the remaining slots are stored alongside the sprite geometry
//! in an [`IndexRecord`](crate::index::IndexRecord). Pixels are written as one
//! palette slot per byte, in either row-major or column-major order.
//!
//! # Examples
//!
//! ```
//! use texpak_types::texture::{codec, ScanOrder, Sprite};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pixels = vec![0x000000, 0xFF00FF, 0xFF00FF, 0x000000];
//! let sprite = Sprite::new(7, 2, 2, pixels)?.with_format(ScanOrder::Vertical);
//!
//! let encoded = codec::encode(&sprite)?;
//! assert_eq!(encoded.record.colors, vec![0xFF00FF]);
//! assert_eq!(encoded.pixels, vec![0, 1, 1, 0]);
//!
//! let decoded = codec::decode(7, &encoded.record, &encoded.pixels)?;
//! assert_eq!(decoded, sprite);
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

pub mod codec;
pub mod palette;

pub use codec::EncodedSprite;
pub use palette::Palette;

/// Mask applied to every color before it is compared or stored
pub const RGB_MASK: u32 = 0x00FF_FFFF;

/// Maximum number of palette slots, background included
pub const MAX_COLORS: usize = 255;

/// Order in which a sprite's pixel grid is linearized into payload bytes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ScanOrder {
	/// Row-major: rows outer, columns inner
	#[default]
	Horizontal = 0,
	/// Column-major: columns outer, rows inner
	Vertical = 1,
}

impl ScanOrder {
	/// Converts a stored format flag. Any non-zero flag reads as vertical.
	pub fn from_u8(value: u8) -> Self {
		match value {
			0 => Self::Horizontal,
			_ => Self::Vertical,
		}
	}

	/// Converts `ScanOrder` to its stored flag
	pub fn to_u8(self) -> u8 {
		self as u8
	}

	/// Visits every `(x, y)` coordinate of a `width * height` grid in this order
	pub(crate) fn for_each_coord(self, width: usize, height: usize, mut f: impl FnMut(usize, usize)) {
		match self {
			Self::Horizontal => {
				for y in 0..height {
					for x in 0..width {
						f(x, y);
					}
				}
			}
			Self::Vertical => {
				for x in 0..width {
					for y in 0..height {
						f(x, y);
					}
				}
			}
		}
	}
}

impl fmt::Display for ScanOrder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Horizontal => write!(f, "Horizontal"),
			Self::Vertical => write!(f, "Vertical"),
		}
	}
}

/// A decoded sprite texture.
///
/// `pixels` is row-major and always `width * height` long; every value is
/// masked to 24 bits on the way in. The bitmap and its dimensions only change
/// together, through [`replace_pixels`](Self::replace_pixels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
	/// Archive-unique id, also names the payload entry (`"{id}.dat"`)
	pub id: u32,

	width: u16,
	height: u16,

	/// Horizontal placement inside the resize canvas
	pub offset_x: u8,

	/// Vertical placement inside the resize canvas
	pub offset_y: u8,

	/// Logical canvas width
	pub resize_width: u16,

	/// Logical canvas height
	pub resize_height: u16,

	/// Payload scan order
	pub format: ScanOrder,

	pixels: Vec<u32>,
}

impl Sprite {
	/// Creates a sprite from row-major RGB pixels.
	///
	/// The resize canvas defaults to the stored dimensions, offsets to zero and
	/// the scan order to [`ScanOrder::Horizontal`].
	///
	/// # Errors
	///
	/// Returns [`CodecError::PixelCountMismatch`] if `pixels` is not
	/// `width * height` long.
	pub fn new(id: u32, width: u16, height: u16, pixels: Vec<u32>) -> Result<Self, CodecError> {
		let expected = width as usize * height as usize;
		if pixels.len() != expected {
			return Err(CodecError::PixelCountMismatch {
				expected,
				actual: pixels.len(),
			});
		}

		Ok(Self {
			id,
			width,
			height,
			offset_x: 0,
			offset_y: 0,
			resize_width: width,
			resize_height: height,
			format: ScanOrder::Horizontal,
			pixels: pixels.into_iter().map(|rgb| rgb & RGB_MASK).collect(),
		})
	}

	/// Creates a sprite from packed RGB8 bytes (3 bytes per pixel, row-major)
	pub fn from_rgb_bytes(id: u32, width: u16, height: u16, rgb: &[u8]) -> Result<Self, CodecError> {
		let expected = width as usize * height as usize;
		if rgb.len() != expected * 3 {
			return Err(CodecError::PixelCountMismatch {
				expected,
				actual: rgb.len() / 3,
			});
		}

		let pixels = rgb
			.chunks_exact(3)
			.map(|c| ((c[0] as u32) << 16) | ((c[1] as u32) << 8) | (c[2] as u32))
			.collect();

		Self::new(id, width, height, pixels)
	}

	/// Sets the logical resize canvas
	pub fn with_resize(mut self, resize_width: u16, resize_height: u16) -> Self {
		self.resize_width = resize_width;
		self.resize_height = resize_height;
		self
	}

	/// Sets the placement offsets
	pub fn with_offsets(mut self, offset_x: u8, offset_y: u8) -> Self {
		self.offset_x = offset_x;
		self.offset_y = offset_y;
		self
	}

	/// Sets the payload scan order
	pub fn with_format(mut self, format: ScanOrder) -> Self {
		self.format = format;
		self
	}

	/// Returns the stored bitmap width
	#[inline]
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Returns the stored bitmap height
	#[inline]
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Returns the row-major pixel buffer
	#[inline]
	pub fn pixels(&self) -> &[u32] {
		&self.pixels
	}

	/// Returns the total number of pixels
	#[inline]
	pub fn pixel_count(&self) -> usize {
		self.pixels.len()
	}

	/// Returns the pixel at `(x, y)`, or `None` outside the bitmap
	pub fn pixel(&self, x: u16, y: u16) -> Option<u32> {
		if x >= self.width || y >= self.height {
			return None;
		}
		self.pixels.get(y as usize * self.width as usize + x as usize).copied()
	}

	/// Replaces the bitmap, keeping id, geometry metadata and scan order
	pub fn replace_pixels(&mut self, width: u16, height: u16, pixels: Vec<u32>) -> Result<(), CodecError> {
		let replacement = Self::new(self.id, width, height, pixels)?;
		self.width = replacement.width;
		self.height = replacement.height;
		self.pixels = replacement.pixels;
		Ok(())
	}

	/// Counts distinct colors, background included only when present
	pub fn distinct_colors(&self) -> usize {
		self.pixels.iter().collect::<HashSet<_>>().len()
	}

	/// Converts pixels to packed RGB8 bytes (row-major)
	pub fn to_rgb_bytes(&self) -> Vec<u8> {
		let mut rgb = Vec::with_capacity(self.pixels.len() * 3);
		for &pixel in &self.pixels {
			rgb.push((pixel >> 16) as u8);
			rgb.push((pixel >> 8) as u8);
			rgb.push(pixel as u8);
		}
		rgb
	}
}

impl fmt::Display for Sprite {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Sprite #{}: {}x{} (canvas {}x{}, offset {},{}, {})",
			self.id,
			self.width,
			self.height,
			self.resize_width,
			self.resize_height,
			self.offset_x,
			self.offset_y,
			self.format
		)
	}
}

/// Limits applied to externally imported images before they join a sprite set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportLimits {
	/// Smallest accepted width/height
	pub min_dimension: u16,
	/// Largest accepted width/height
	pub max_dimension: u16,
	/// Largest accepted distinct color count, background included
	pub max_colors: usize,
}

impl ImportLimits {
	/// Limits with no dimension window
	pub const fn unrestricted() -> Self {
		Self {
			min_dimension: 0,
			max_dimension: u16::MAX,
			max_colors: MAX_COLORS,
		}
	}

	/// Checks a sprite against these limits.
	///
	/// # Errors
	///
	/// Returns [`CodecError::DimensionsOutOfRange`] or
	/// [`CodecError::PaletteOverflow`].
	pub fn check(&self, sprite: &Sprite) -> Result<(), CodecError> {
		let window = self.min_dimension..=self.max_dimension;
		if !window.contains(&sprite.width()) || !window.contains(&sprite.height()) {
			return Err(CodecError::DimensionsOutOfRange {
				width: sprite.width(),
				height: sprite.height(),
				min: self.min_dimension,
				max: self.max_dimension,
			});
		}

		// slot 0 is reserved whether or not the image uses the background
		let has_background = sprite.pixels().contains(&Palette::BACKGROUND);
		let colors = sprite.distinct_colors() + usize::from(!has_background);
		if colors > self.max_colors {
			return Err(CodecError::PaletteOverflow {
				colors,
				limit: self.max_colors,
			});
		}

		Ok(())
	}
}

impl Default for ImportLimits {
	fn default() -> Self {
		Self {
			min_dimension: 64,
			max_dimension: 128,
			max_colors: MAX_COLORS,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_masks_pixels() {
		let sprite = Sprite::new(0, 2, 1, vec![0xFF12_3456, 0x0000_0001]).unwrap();
		assert_eq!(sprite.pixels(), &[0x12_3456, 0x01]);
		assert_eq!(sprite.resize_width, 2);
		assert_eq!(sprite.resize_height, 1);
		assert_eq!(sprite.format, ScanOrder::Horizontal);
	}

	#[test]
	fn test_new_rejects_wrong_length() {
		let err = Sprite::new(0, 3, 3, vec![0; 8]).unwrap_err();
		assert_eq!(
			err,
			CodecError::PixelCountMismatch {
				expected: 9,
				actual: 8
			}
		);
	}

	#[test]
	fn test_pixel_lookup() {
		let sprite = Sprite::new(0, 2, 2, vec![1, 2, 3, 4]).unwrap();
		assert_eq!(sprite.pixel(1, 0), Some(2));
		assert_eq!(sprite.pixel(0, 1), Some(3));
		assert_eq!(sprite.pixel(2, 0), None);
	}

	#[test]
	fn test_rgb_bytes_roundtrip() {
		let rgb = [0xFF, 0x00, 0xFF, 0x01, 0x02, 0x03];
		let sprite = Sprite::from_rgb_bytes(1, 2, 1, &rgb).unwrap();
		assert_eq!(sprite.pixels(), &[0xFF00FF, 0x010203]);
		assert_eq!(sprite.to_rgb_bytes(), rgb);
	}

	#[test]
	fn test_scan_order_flags() {
		assert_eq!(ScanOrder::from_u8(0), ScanOrder::Horizontal);
		assert_eq!(ScanOrder::from_u8(1), ScanOrder::Vertical);
		assert_eq!(ScanOrder::from_u8(7), ScanOrder::Vertical);
		assert_eq!(ScanOrder::Vertical.to_u8(), 1);
	}

	#[test]
	fn test_scan_order_coords() {
		let mut h = Vec::new();
		ScanOrder::Horizontal.for_each_coord(2, 2, |x, y| h.push((x, y)));
		assert_eq!(h, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);

		let mut v = Vec::new();
		ScanOrder::Vertical.for_each_coord(2, 2, |x, y| v.push((x, y)));
		assert_eq!(v, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
	}

	#[test]
	fn test_import_limits() {
		let limits = ImportLimits::default();
		let small = Sprite::new(0, 32, 64, vec![0; 32 * 64]).unwrap();
		assert!(matches!(limits.check(&small), Err(CodecError::DimensionsOutOfRange { .. })));

		let ok = Sprite::new(0, 64, 128, vec![0; 64 * 128]).unwrap();
		assert!(limits.check(&ok).is_ok());
		assert!(ImportLimits::unrestricted().check(&small).is_ok());
	}

	#[test]
	fn test_import_limits_colors() {
		let pixels: Vec<u32> = (0..64 * 64).map(|i| i as u32 % 300).collect();
		let sprite = Sprite::new(0, 64, 64, pixels).unwrap();
		assert_eq!(
			ImportLimits::default().check(&sprite),
			Err(CodecError::PaletteOverflow {
				colors: 300,
				limit: MAX_COLORS
			})
		);

		// 255 colors without the background still need a 256th slot
		let pixels: Vec<u32> = (0..64 * 64).map(|i| i as u32 % 255 + 1).collect();
		let sprite = Sprite::new(1, 64, 64, pixels).unwrap();
		assert!(matches!(
			ImportLimits::default().check(&sprite),
			Err(CodecError::PaletteOverflow { colors: 256, .. })
		));
	}

	#[test]
	fn test_replace_pixels_keeps_metadata() {
		let mut sprite = Sprite::new(4, 1, 1, vec![0]).unwrap().with_resize(64, 64).with_offsets(3, 4);
		sprite.replace_pixels(2, 1, vec![0xFF, 0xFF00]).unwrap();
		assert_eq!(sprite.id, 4);
		assert_eq!((sprite.width(), sprite.height()), (2, 1));
		assert_eq!((sprite.resize_width, sprite.resize_height), (64, 64));
		assert_eq!((sprite.offset_x, sprite.offset_y), (3, 4));
	}
}
