//! `index.dat` table support.
//!
//! The index table is a plain concatenation of one [`IndexRecord`] per sprite,
//! written in ascending id order. No sprite id or record count is stored:
//! every `{id}.dat` payload starts with a 2-byte offset pointing at the start
//! of its own record, so records are located through the payloads.
//!
//! # Record Format
//!
//! All multi-byte fields are big-endian:
//! - Resize width (2 bytes)
//! - Resize height (2 bytes)
//! - Color count (1 byte, palette size minus the implicit background slot)
//! - Colors (3 bytes each, `color count` entries)
//! - Offset X (1 byte)
//! - Offset Y (1 byte)
//! - Width (2 bytes)
//! - Height (2 bytes)
//! - Format (1 byte, 0 = horizontal, 1 = vertical)
//!
//! # Payload Header
//!
//! - Index offset (2 bytes, big-endian): the table length *before* the
//!   sprite's record was appended

use std::fmt;

use crate::error::IndexError;
use crate::texture::{Palette, ScanOrder};

/// Size of the index offset header at the start of every payload
pub const PAYLOAD_HEADER_SIZE: usize = 2;

mod constants {
	/// Fixed part of a record: everything except the colors
	pub const RECORD_FIXED_SIZE: usize = 12;

	/// Bytes read before the color list (resize width/height + color count)
	pub const RECORD_PREFIX_SIZE: usize = 5;

	/// Size of one stored color
	pub const COLOR_SIZE: usize = 3;
}

/// Per-sprite metadata stored in `index.dat`
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct IndexRecord {
	/// Logical canvas width
	pub resize_width: u16,

	/// Logical canvas height
	pub resize_height: u16,

	/// Palette slots 1.., the background slot 0 is implied
	pub colors: Vec<u32>,

	/// Horizontal placement inside the canvas
	pub offset_x: u8,

	/// Vertical placement inside the canvas
	pub offset_y: u8,

	/// Stored bitmap width
	pub width: u16,

	/// Stored bitmap height
	pub height: u16,

	/// Raw scan order flag
	pub format: u8,
}

impl IndexRecord {
	/// Returns the stored color count byte.
	///
	/// # Errors
	///
	/// Returns [`IndexError::TooManyColors`] if the record lists more than
	/// 255 colors.
	#[inline]
	pub fn color_count(&self) -> Result<u8, IndexError> {
		u8::try_from(self.colors.len()).map_err(|_| IndexError::TooManyColors {
			colors: self.colors.len(),
		})
	}

	/// Returns the palette size, background slot included
	#[inline]
	pub fn palette_len(&self) -> usize {
		self.colors.len() + 1
	}

	/// Returns the color in palette `slot`
	#[inline]
	pub fn color(&self, slot: u8) -> Option<u32> {
		match slot {
			0 => Some(Palette::BACKGROUND),
			n => self.colors.get(n as usize - 1).copied(),
		}
	}

	/// Returns the decoded scan order
	#[inline]
	pub fn scan_order(&self) -> ScanOrder {
		ScanOrder::from_u8(self.format)
	}

	/// Returns the encoded size of this record in bytes
	#[inline]
	pub fn encoded_size(&self) -> usize {
		constants::RECORD_FIXED_SIZE + self.colors.len() * constants::COLOR_SIZE
	}

	/// Appends the encoded record to `out`.
	///
	/// `out` is left untouched if the color count does not fit its byte.
	pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), IndexError> {
		let color_count = self.color_count()?;
		out.reserve(self.encoded_size());
		out.extend_from_slice(&self.resize_width.to_be_bytes());
		out.extend_from_slice(&self.resize_height.to_be_bytes());
		out.push(color_count);
		for &color in &self.colors {
			out.extend_from_slice(&color.to_be_bytes()[1..]);
		}
		out.push(self.offset_x);
		out.push(self.offset_y);
		out.extend_from_slice(&self.width.to_be_bytes());
		out.extend_from_slice(&self.height.to_be_bytes());
		out.push(self.format);
		Ok(())
	}

	/// Serializes the record to bytes
	pub fn to_bytes(&self) -> Result<Vec<u8>, IndexError> {
		let mut out = Vec::with_capacity(self.encoded_size());
		self.write_to(&mut out)?;
		Ok(out)
	}

	/// Parses one record starting at `offset` within `data`.
	///
	/// # Errors
	///
	/// Returns [`IndexError::OffsetOutOfBounds`] if `offset` is not inside
	/// `data`, and [`IndexError::Truncated`] if the record, including its
	/// declared colors, runs past the end of `data`.
	pub fn parse_at(data: &[u8], offset: usize) -> Result<Self, IndexError> {
		let len = data.len();
		if offset >= len {
			return Err(IndexError::OffsetOutOfBounds {
				offset,
				len,
			});
		}

		let truncated = |needed| IndexError::Truncated {
			offset,
			needed,
			len,
		};

		let rest = &data[offset..];
		if rest.len() < constants::RECORD_PREFIX_SIZE {
			return Err(truncated(constants::RECORD_FIXED_SIZE));
		}

		let color_count = rest[4] as usize;
		let needed = constants::RECORD_FIXED_SIZE + color_count * constants::COLOR_SIZE;
		if rest.len() < needed {
			return Err(truncated(needed));
		}

		let u16_at = |pos: usize| u16::from_be_bytes([rest[pos], rest[pos + 1]]);

		let colors = rest[constants::RECORD_PREFIX_SIZE..]
			.chunks_exact(constants::COLOR_SIZE)
			.take(color_count)
			.map(|c| u32::from_be_bytes([0, c[0], c[1], c[2]]))
			.collect();

		let tail = constants::RECORD_PREFIX_SIZE + color_count * constants::COLOR_SIZE;

		Ok(Self {
			resize_width: u16_at(0),
			resize_height: u16_at(2),
			colors,
			offset_x: rest[tail],
			offset_y: rest[tail + 1],
			width: u16_at(tail + 2),
			height: u16_at(tail + 4),
			format: rest[tail + 6],
		})
	}
}

impl fmt::Display for IndexRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}x{} (canvas {}x{}, offset {},{}), {} colors, {}",
			self.width,
			self.height,
			self.resize_width,
			self.resize_height,
			self.offset_x,
			self.offset_y,
			self.palette_len(),
			self.scan_order()
		)
	}
}

/// Encodes a payload's index offset header
#[inline]
pub fn write_payload_header(offset: u16) -> [u8; PAYLOAD_HEADER_SIZE] {
	offset.to_be_bytes()
}

/// Reads a payload's index offset header, `None` if the payload is too short
#[inline]
pub fn read_payload_header(payload: &[u8]) -> Option<u16> {
	match payload {
		[hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
		_ => None,
	}
}

/// The `index.dat` byte stream
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndexTable {
	data: Vec<u8>,
}

impl IndexTable {
	/// Creates an empty table
	pub fn new() -> Self {
		Self::default()
	}

	/// Wraps existing `index.dat` bytes
	pub fn from_bytes(data: Vec<u8>) -> Self {
		Self {
			data,
		}
	}

	/// Appends a record and returns the offset it starts at.
	///
	/// # Errors
	///
	/// Returns [`IndexError::OffsetOverflow`] if that offset does not fit the
	/// 16-bit payload header and [`IndexError::TooManyColors`] if the record's
	/// color count does not fit its byte. The table is left untouched in either
	/// case.
	pub fn push(&mut self, record: &IndexRecord) -> Result<u16, IndexError> {
		let offset = u16::try_from(self.data.len()).map_err(|_| IndexError::OffsetOverflow {
			offset: self.data.len(),
		})?;
		record.write_to(&mut self.data)?;
		Ok(offset)
	}

	/// Reads the record starting at `offset`
	pub fn record_at(&self, offset: u16) -> Result<IndexRecord, IndexError> {
		IndexRecord::parse_at(&self.data, offset as usize)
	}

	/// Walks every record from the start of the table.
	///
	/// Yields `(offset, record)` pairs; stops after the first corrupt record.
	pub fn records(&self) -> Records<'_> {
		Records {
			data: &self.data,
			cursor: 0,
			failed: false,
		}
	}

	/// Returns the table length in bytes
	#[inline]
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// Returns `true` if the table holds no records
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Returns the raw bytes
	#[inline]
	pub fn as_bytes(&self) -> &[u8] {
		&self.data
	}

	/// Consumes the table, returning its bytes
	pub fn into_bytes(self) -> Vec<u8> {
		self.data
	}
}

impl From<IndexTable> for Vec<u8> {
	fn from(table: IndexTable) -> Self {
		table.data
	}
}

impl From<Vec<u8>> for IndexTable {
	fn from(data: Vec<u8>) -> Self {
		Self::from_bytes(data)
	}
}

/// Sequential iterator over the records of an [`IndexTable`]
#[derive(Debug, Clone)]
pub struct Records<'a> {
	data: &'a [u8],
	cursor: usize,
	failed: bool,
}

impl Iterator for Records<'_> {
	type Item = Result<(usize, IndexRecord), IndexError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed || self.cursor >= self.data.len() {
			return None;
		}

		let offset = self.cursor;
		match IndexRecord::parse_at(self.data, offset) {
			Ok(record) => {
				self.cursor += record.encoded_size();
				Some(Ok((offset, record)))
			}
			Err(e) => {
				self.failed = true;
				Some(Err(e))
			}
		}
	}
}
