//! Building texture archives from sprites.

use log::{debug, info};

use crate::container::{Archive, ArchiveStore, Container};
use crate::error::ArchiveError;
use crate::index::IndexTable;
use crate::texture::{Sprite, codec};

use super::{INDEX_NAME, check_id, payload_name};

/// Encodes every sprite and returns the entries to write, `index.dat` last.
///
/// Nothing is written anywhere until every sprite has encoded.
fn build_entries<'a>(
	sprites: impl IntoIterator<Item = &'a Sprite>,
) -> Result<Vec<(String, Vec<u8>)>, ArchiveError> {
	let mut ordered: Vec<&Sprite> = sprites.into_iter().collect();
	ordered.sort_by_key(|sprite| sprite.id);

	if let Some(pair) = ordered.windows(2).find(|pair| pair[0].id == pair[1].id) {
		return Err(ArchiveError::DuplicateId(pair[0].id));
	}
	if let Some(last) = ordered.last() {
		check_id(last.id)?;
	}

	let mut index = IndexTable::new();
	let mut entries = Vec::with_capacity(ordered.len() + 1);

	for sprite in ordered {
		let encoded = codec::encode(sprite).map_err(|source| ArchiveError::AssemblyAborted {
			id: sprite.id,
			source,
		})?;
		let offset = index.push(&encoded.record)?;
		entries.push((payload_name(sprite.id), encoded.to_payload(offset)));
	}

	debug!("Index table: {} bytes for {} sprites", index.len(), entries.len());
	entries.push((INDEX_NAME.to_string(), index.into_bytes()));

	Ok(entries)
}

/// Builds a fresh archive holding `sprites`.
///
/// Sprites are ordered by id (stable) before encoding.
///
/// # Errors
///
/// - [`ArchiveError::AssemblyAborted`] if any sprite fails to encode
/// - [`ArchiveError::Index`] if the index table outgrows its 16-bit offsets
/// - [`ArchiveError::DuplicateId`] if two sprites share an id
/// - [`ArchiveError::IdOutOfRange`] if an id exceeds [`MAX_PROBE_ID`](super::MAX_PROBE_ID)
pub fn assemble<'a>(sprites: impl IntoIterator<Item = &'a Sprite>) -> Result<Archive, ArchiveError> {
	let mut archive = Archive::new();
	assemble_into(sprites, &mut archive)?;
	Ok(archive)
}

/// Encodes `sprites` and writes the resulting entries into `container`.
///
/// The container is only touched once every sprite has encoded, so a failed
/// assembly leaves it unchanged.
pub fn assemble_into<'a, C: Container + ?Sized>(
	sprites: impl IntoIterator<Item = &'a Sprite>,
	container: &mut C,
) -> Result<(), ArchiveError> {
	for (name, data) in build_entries(sprites)? {
		container.write_file(&name, data);
	}
	Ok(())
}

/// Assembles `sprites` and stores the encoded archive in `archive_id`.
///
/// Returns the size of the stored archive. The store is written exactly once,
/// after the archive has been fully built and encoded.
pub fn pack<'a, S: ArchiveStore + ?Sized>(
	sprites: impl IntoIterator<Item = &'a Sprite>,
	store: &mut S,
	archive_id: u32,
) -> Result<usize, ArchiveError> {
	let archive = assemble(sprites)?;
	let encoded = archive.encode()?;
	let size = encoded.len();

	store.write_archive(archive_id, encoded)?;
	info!("Packed {} entries ({size} bytes) into archive {archive_id}", archive.entry_count());

	Ok(size)
}
