//! Archive storage slots.
//!
//! A store keeps whole encoded archives under numeric slot ids, the way a
//! multi-archive file store does.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ContainerError;

/// Storage keyed by numeric archive slot
pub trait ArchiveStore {
	/// Reads the archive in `archive_id`, `None` if the slot is empty
	fn read_archive(&self, archive_id: u32) -> Result<Option<Vec<u8>>, ContainerError>;

	/// Replaces the archive in `archive_id`
	fn write_archive(&mut self, archive_id: u32, data: Vec<u8>) -> Result<(), ContainerError>;
}

/// Store held entirely in memory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStore {
	slots: BTreeMap<u32, Vec<u8>>,
}

impl MemoryStore {
	/// Creates an empty store
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the archive in `archive_id`
	pub fn get(&self, archive_id: u32) -> Option<&[u8]> {
		self.slots.get(&archive_id).map(Vec::as_slice)
	}

	/// Returns the number of occupied slots
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Returns `true` if no slot is occupied
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}
}

impl ArchiveStore for MemoryStore {
	fn read_archive(&self, archive_id: u32) -> Result<Option<Vec<u8>>, ContainerError> {
		Ok(self.slots.get(&archive_id).cloned())
	}

	fn write_archive(&mut self, archive_id: u32, data: Vec<u8>) -> Result<(), ContainerError> {
		self.slots.insert(archive_id, data);
		Ok(())
	}
}

/// Store keeping one `{archive_id}.jag` file per slot inside a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirStore {
	root: PathBuf,
}

impl DirStore {
	/// Opens a store rooted at `root`; the directory is created on first write
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
		}
	}

	/// Returns the store directory
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Returns the file backing `archive_id`
	pub fn slot_path(&self, archive_id: u32) -> PathBuf {
		self.root.join(format!("{archive_id}.jag"))
	}
}

impl ArchiveStore for DirStore {
	fn read_archive(&self, archive_id: u32) -> Result<Option<Vec<u8>>, ContainerError> {
		match fs::read(self.slot_path(archive_id)) {
			Ok(data) => Ok(Some(data)),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
			Err(e) => Err(e.into()),
		}
	}

	fn write_archive(&mut self, archive_id: u32, data: Vec<u8>) -> Result<(), ContainerError> {
		fs::create_dir_all(&self.root)?;
		fs::write(self.slot_path(archive_id), data)?;
		Ok(())
	}
}
