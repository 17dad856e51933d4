//! In-memory hashed-name archive.
//!
//! # File Structure
//!
//! All fields big-endian:
//! - **Header (6 bytes):** unpacked body size (3 bytes), packed body size (3 bytes)
//! - **Body:**
//!   - Entry count (2 bytes)
//!   - Entry table, 10 bytes per entry: name hash (4 bytes, signed),
//!     unpacked size (3 bytes), packed size (3 bytes)
//!   - Entry data, concatenated in table order
//!
//! Only stored archives are handled: packed and unpacked sizes must match
//! for the body and for every entry.

use std::collections::HashMap;
use std::fmt;

use crate::error::ContainerError;

use super::{Container, Entry, name_hash};

mod constants {
	/// Size of the archive header
	pub const HEADER_SIZE: usize = 6;

	/// Size of the entry count field
	pub const COUNT_SIZE: usize = 2;

	/// Size of one entry table row
	pub const ENTRY_SIZE: usize = 10;

	/// Largest value a 3-byte size field holds
	pub const MAX_U24: usize = 0x00FF_FFFF;
}

/// Hashed-name archive held in memory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Archive {
	entries: Vec<Entry>,
	positions: HashMap<i32, usize>,
}

impl Archive {
	/// Creates an empty archive
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses an archive from bytes.
	///
	/// # Errors
	///
	/// Returns [`ContainerError::InsufficientData`] on truncated input and
	/// [`ContainerError::CompressedUnsupported`] if the body or an entry is
	/// stored compressed.
	pub fn from_bytes(data: &[u8]) -> Result<Self, ContainerError> {
		let header = read_exact(data, 0, constants::HEADER_SIZE)?;
		let unpacked = read_u24(&header[0..3]);
		let packed = read_u24(&header[3..6]);
		if unpacked != packed {
			return Err(ContainerError::CompressedUnsupported {
				packed,
				unpacked,
			});
		}

		let body = read_exact(data, constants::HEADER_SIZE, packed)?;
		let count_bytes = read_exact(body, 0, constants::COUNT_SIZE)?;
		let count = u16::from_be_bytes([count_bytes[0], count_bytes[1]]) as usize;

		let table = read_exact(body, constants::COUNT_SIZE, count * constants::ENTRY_SIZE)?;
		let mut cursor = constants::COUNT_SIZE + table.len();

		let mut archive = Self::new();
		for row in table.chunks_exact(constants::ENTRY_SIZE) {
			let hash = i32::from_be_bytes([row[0], row[1], row[2], row[3]]);
			let unpacked = read_u24(&row[4..7]);
			let packed = read_u24(&row[7..10]);
			if unpacked != packed {
				return Err(ContainerError::CompressedUnsupported {
					packed,
					unpacked,
				});
			}

			let entry_data = read_exact(body, cursor, packed)?;
			cursor += packed;
			archive.insert(Entry {
				hash,
				data: entry_data.to_vec(),
			});
		}

		Ok(archive)
	}

	/// Loads an archive from a file
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, ContainerError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Saves the archive to a file
	pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), ContainerError> {
		std::fs::write(path, self.to_bytes()?)?;
		Ok(())
	}

	/// Serializes the archive.
	///
	/// # Errors
	///
	/// Returns [`ContainerError::TooManyEntries`] above 65535 entries and
	/// [`ContainerError::EntryTooLarge`] if an entry or the body does not fit a
	/// 3-byte size field.
	pub fn to_bytes(&self) -> Result<Vec<u8>, ContainerError> {
		let count = u16::try_from(self.entries.len())
			.map_err(|_| ContainerError::TooManyEntries(self.entries.len()))?;

		let data_size: usize = self.entries.iter().map(|entry| entry.data.len()).sum();
		let body_size =
			constants::COUNT_SIZE + self.entries.len() * constants::ENTRY_SIZE + data_size;
		if body_size > constants::MAX_U24 {
			return Err(ContainerError::EntryTooLarge(body_size));
		}

		let mut out = Vec::with_capacity(constants::HEADER_SIZE + body_size);
		write_u24(&mut out, body_size);
		write_u24(&mut out, body_size);
		out.extend_from_slice(&count.to_be_bytes());

		for entry in &self.entries {
			out.extend_from_slice(&entry.hash.to_be_bytes());
			write_u24(&mut out, entry.data.len());
			write_u24(&mut out, entry.data.len());
		}
		for entry in &self.entries {
			out.extend_from_slice(&entry.data);
		}

		Ok(out)
	}

	/// Removes the entry with the given name, returning its data
	pub fn remove_file(&mut self, name: &str) -> Option<Vec<u8>> {
		let position = self.positions.remove(&name_hash(name))?;
		let entry = self.entries.remove(position);
		for slot in self.positions.values_mut() {
			if *slot > position {
				*slot -= 1;
			}
		}
		Some(entry.data)
	}

	fn insert(&mut self, entry: Entry) {
		match self.positions.get(&entry.hash) {
			Some(&position) => self.entries[position] = entry,
			None => {
				self.positions.insert(entry.hash, self.entries.len());
				self.entries.push(entry);
			}
		}
	}
}

impl Container for Archive {
	fn entries(&self) -> &[Entry] {
		&self.entries
	}

	fn lookup(&self, hash: i32) -> Option<&Entry> {
		self.positions.get(&hash).map(|&position| &self.entries[position])
	}

	fn write_file(&mut self, name: &str, data: Vec<u8>) {
		self.insert(Entry::new(name, data));
	}

	fn encode(&self) -> Result<Vec<u8>, ContainerError> {
		self.to_bytes()
	}
}

impl TryFrom<&[u8]> for Archive {
	type Error = ContainerError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl fmt::Display for Archive {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let size: usize = self.entries.iter().map(|entry| entry.data.len()).sum();
		write!(f, "Archive: {} entries, {} data bytes", self.entries.len(), size)
	}
}

fn read_exact(data: &[u8], offset: usize, len: usize) -> Result<&[u8], ContainerError> {
	data.get(offset..offset + len).ok_or(ContainerError::InsufficientData {
		expected: offset + len,
		actual: data.len(),
	})
}

fn read_u24(bytes: &[u8]) -> usize {
	((bytes[0] as usize) << 16) | ((bytes[1] as usize) << 8) | (bytes[2] as usize)
}

fn write_u24(out: &mut Vec<u8>, value: usize) {
	out.extend_from_slice(&(value as u32).to_be_bytes()[1..]);
}
