//! Recovering sprites from texture archives.

use log::{debug, warn};

use crate::container::{Archive, ArchiveStore, Container, name_hash};
use crate::error::{ArchiveError, CodecError};
use crate::index::{self, IndexTable};
use crate::texture::{Sprite, codec};

use super::{INDEX_NAME, MAX_PROBE_ID, SpriteSet, payload_name};

/// A payload entry that matched a sprite id but failed to decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSprite {
	/// Sprite id
	pub id: u32,

	/// Decode failure
	pub error: CodecError,
}

/// Result of scanning an archive
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
	/// Decoded sprites, ascending by id
	pub sprites: Vec<Sprite>,

	/// Payloads that were found but could not be decoded
	pub skipped: Vec<SkippedSprite>,

	/// Entries left unmatched when probing stopped at [`MAX_PROBE_ID`]
	pub unmatched: usize,
}

impl ScanReport {
	/// Moves the decoded sprites into a [`SpriteSet`]
	pub fn into_set(self) -> SpriteSet {
		SpriteSet::from_scanned(self.sprites)
	}
}

/// Decodes every sprite in a texture archive.
///
/// Payload entries are discovered by probing `"{id}.dat"` name hashes for
/// ids 0, 1, 2, ... until every non-index entry has been matched. Gaps in the
/// id sequence are fine. A payload that fails to decode is logged and listed
/// in [`ScanReport::skipped`]; scanning carries on with the next id.
///
/// # Errors
///
/// - [`ArchiveError::MissingIndex`] if there is no `index.dat` entry
/// - [`ArchiveError::Index`] if a payload's offset or its record falls
///   outside `index.dat`; index corruption aborts the whole scan
pub fn scan<C: Container + ?Sized>(container: &C) -> Result<ScanReport, ArchiveError> {
	let index_hash = name_hash(INDEX_NAME);
	let index_entry = container.lookup(index_hash).ok_or(ArchiveError::MissingIndex)?;
	let table = IndexTable::from_bytes(index_entry.data.clone());

	let mut remaining = container.entries().iter().filter(|entry| entry.hash != index_hash).count();
	let mut report = ScanReport::default();

	let mut id = 0;
	while remaining > 0 && id <= MAX_PROBE_ID {
		let hash = name_hash(&payload_name(id));
		let entry = match container.lookup(hash) {
			Some(entry) if hash != index_hash => entry,
			_ => {
				id += 1;
				continue;
			}
		};
		remaining -= 1;

		let Some(offset) = index::read_payload_header(&entry.data) else {
			let error = CodecError::PayloadTooShort {
				expected: index::PAYLOAD_HEADER_SIZE,
				actual: entry.data.len(),
			};
			warn!("Skipping sprite {id}: {error}");
			report.skipped.push(SkippedSprite {
				id,
				error,
			});
			id += 1;
			continue;
		};

		let record = table.record_at(offset)?;
		match codec::decode_payload(id, &record, &entry.data) {
			Ok(sprite) => report.sprites.push(sprite),
			Err(error) => {
				warn!("Skipping sprite {id}: {error}");
				report.skipped.push(SkippedSprite {
					id,
					error,
				});
			}
		}
		id += 1;
	}

	if remaining > 0 {
		warn!("{remaining} archive entries matched no sprite id up to {MAX_PROBE_ID}");
	}
	report.unmatched = remaining;

	report.sprites.sort_by_key(|sprite| sprite.id);
	debug!(
		"Scanned {} sprites ({} skipped) from {} index bytes",
		report.sprites.len(),
		report.skipped.len(),
		table.len()
	);

	Ok(report)
}

/// Reads the archive in `archive_id` from `store` and scans it.
///
/// # Errors
///
/// Returns [`ArchiveError::MissingArchive`] if the slot is empty, plus
/// anything [`Archive::from_bytes`] or [`scan`] reports.
pub fn unpack<S: ArchiveStore + ?Sized>(store: &S, archive_id: u32) -> Result<ScanReport, ArchiveError> {
	let data = store.read_archive(archive_id)?.ok_or(ArchiveError::MissingArchive(archive_id))?;
	let archive = Archive::from_bytes(&data)?;
	scan(&archive)
}
