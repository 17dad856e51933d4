//! Per-sprite palettes.
//!
//! Slot 0 is always the background color `0` and is implied by the index
//! record rather than stored. A palette holds at most [`MAX_COLORS`] slots.

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;

use crate::error::CodecError;

use super::{MAX_COLORS, RGB_MASK};

/// Ordered, duplicate-free color list with slot 0 fixed to the background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	colors: Vec<u32>,
	slots: HashMap<u32, u8>,
}

impl Palette {
	/// Background color occupying slot 0
	pub const BACKGROUND: u32 = 0;

	/// Creates a palette holding only the background slot
	pub fn new() -> Self {
		Self {
			colors: vec![Self::BACKGROUND],
			slots: HashMap::from([(Self::BACKGROUND, 0)]),
		}
	}

	/// Builds the minimal palette for a row-major pixel grid.
	///
	/// Pixels are visited column by column; the first occurrence of each masked
	/// color takes the next free slot.
	///
	/// # Errors
	///
	/// Returns [`CodecError::PaletteOverflow`] with the image's full distinct
	/// color count once a 256th color is found, and
	/// [`CodecError::PixelCountMismatch`] if `pixels` is not
	/// `width * height` long.
	pub fn build(width: u16, height: u16, pixels: &[u32]) -> Result<Self, CodecError> {
		let (width, height) = (width as usize, height as usize);
		if pixels.len() != width * height {
			return Err(CodecError::PixelCountMismatch {
				expected: width * height,
				actual: pixels.len(),
			});
		}

		let mut palette = Self::new();
		for x in 0..width {
			for y in 0..height {
				let rgb = pixels[y * width + x] & RGB_MASK;
				if palette.slots.contains_key(&rgb) {
					continue;
				}
				if palette.colors.len() == MAX_COLORS {
					return Err(CodecError::PaletteOverflow {
						colors: count_distinct(pixels),
						limit: MAX_COLORS,
					});
				}
				palette.push(rgb);
			}
		}

		Ok(palette)
	}

	/// Creates a palette from an explicit color list.
	///
	/// # Errors
	///
	/// Returns [`CodecError::InvalidPalette`] if the list is empty, does not
	/// start with the background color, or repeats a color, and
	/// [`CodecError::PaletteOverflow`] if it has more than [`MAX_COLORS`] entries.
	pub fn from_colors(colors: Vec<u32>) -> Result<Self, CodecError> {
		if colors.first() != Some(&Self::BACKGROUND) {
			return Err(CodecError::InvalidPalette("slot 0 must be the background color 0".to_string()));
		}
		if colors.len() > MAX_COLORS {
			return Err(CodecError::PaletteOverflow {
				colors: colors.len(),
				limit: MAX_COLORS,
			});
		}

		let mut palette = Self::new();
		for &color in &colors[1..] {
			let rgb = color & RGB_MASK;
			if palette.slots.contains_key(&rgb) {
				return Err(CodecError::InvalidPalette(format!("color {rgb:06X} appears twice")));
			}
			palette.push(rgb);
		}

		Ok(palette)
	}

	fn push(&mut self, rgb: u32) {
		self.slots.insert(rgb, self.colors.len() as u8);
		self.colors.push(rgb);
	}

	/// Returns the color in `slot`, if any
	#[inline]
	pub fn get(&self, slot: u8) -> Option<u32> {
		self.colors.get(slot as usize).copied()
	}

	/// Returns the slot holding `rgb` (masked to 24 bits), if any
	#[inline]
	pub fn slot_of(&self, rgb: u32) -> Option<u8> {
		self.slots.get(&(rgb & RGB_MASK)).copied()
	}

	/// Returns the number of slots, background included
	#[inline]
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// Always `false`: the background slot is always present
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	/// Returns all slots in order
	#[inline]
	pub fn colors(&self) -> &[u32] {
		&self.colors
	}

	/// Returns the explicitly stored slots (everything after the background)
	#[inline]
	pub fn extra_colors(&self) -> &[u32] {
		&self.colors[1..]
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for Palette {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Palette: {} colors", self.colors.len())
	}
}

fn count_distinct(pixels: &[u32]) -> usize {
	let mut seen: HashSet<u32> = pixels.iter().map(|&rgb| rgb & RGB_MASK).collect();
	seen.insert(Palette::BACKGROUND);
	seen.len()
}
