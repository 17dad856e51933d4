//! Named-entry containers and archive storage.
//!
//! Texture archives live inside a container whose entries are addressed by
//! the [`name_hash`] of their file name. The texture code only needs the narrow
//! [`Container`] and [`ArchiveStore`] interfaces; [`Archive`], [`MemoryStore`]
//! and [`DirStore`] are the bundled implementations.

mod jag;
mod store;

pub use jag::Archive;
pub use store::{ArchiveStore, DirStore, MemoryStore};

use crate::error::ContainerError;

/// Hashes an entry name the way container entry tables index it.
///
/// The name is upper-cased, then folded as `hash * 61 + (c - 32)` with
/// wrapping 32-bit arithmetic.
///
/// # Examples
///
/// ```
/// use texpak_types::container::name_hash;
///
/// assert_eq!(name_hash("a"), 33);
/// assert_eq!(name_hash("index.dat"), name_hash("INDEX.DAT"));
/// ```
pub fn name_hash(name: &str) -> i32 {
	name.to_uppercase()
		.chars()
		.fold(0i32, |hash, c| hash.wrapping_mul(61).wrapping_add(c as i32 - 32))
}

/// One container entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
	/// Name hash
	pub hash: i32,

	/// Entry contents
	pub data: Vec<u8>,
}

impl Entry {
	/// Creates an entry from a file name
	pub fn new(name: &str, data: Vec<u8>) -> Self {
		Self {
			hash: name_hash(name),
			data,
		}
	}
}

/// A container of hashed-name entries
pub trait Container {
	/// Returns all entries in storage order
	fn entries(&self) -> &[Entry];

	/// Finds the entry with the given name hash
	fn lookup(&self, hash: i32) -> Option<&Entry> {
		self.entries().iter().find(|entry| entry.hash == hash)
	}

	/// Finds the entry with the given name
	fn lookup_name(&self, name: &str) -> Option<&Entry> {
		self.lookup(name_hash(name))
	}

	/// Inserts an entry, replacing any entry with the same name hash
	fn write_file(&mut self, name: &str, data: Vec<u8>);

	/// Serializes the whole container
	fn encode(&self) -> Result<Vec<u8>, ContainerError>;

	/// Returns the number of entries
	fn entry_count(&self) -> usize {
		self.entries().len()
	}
}
