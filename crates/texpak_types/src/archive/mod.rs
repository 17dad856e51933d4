//! Texture archive assembly and scanning.
//!
//! A texture archive is a [`Container`](crate::container::Container) holding:
//! - `index.dat`: one [`IndexRecord`](crate::index::IndexRecord) per sprite,
//!   in ascending id order
//! - `{id}.dat`: per-sprite payload, a 2-byte offset into `index.dat`
//!   followed by one palette slot per pixel
//!
//! Sprite ids are not stored anywhere; [`scan`] recovers them by probing the
//! name hashes of `0.dat`, `1.dat`, ... until every payload entry is matched.
//!
//! # Usage Examples
//!
//! ```
//! use texpak_types::archive::{self, SpriteSet};
//! use texpak_types::container::MemoryStore;
//! use texpak_types::texture::Sprite;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut set = SpriteSet::new();
//! set.insert(Sprite::new(0, 2, 1, vec![0x000000, 0xFF00FF])?)?;
//! set.insert(Sprite::new(5, 1, 1, vec![0x123456])?)?;
//!
//! let mut store = MemoryStore::new();
//! archive::pack(&set, &mut store, archive::TEXTURE_ARCHIVE)?;
//!
//! let report = archive::unpack(&store, archive::TEXTURE_ARCHIVE)?;
//! assert!(report.skipped.is_empty());
//! assert_eq!(report.into_set(), set);
//! # Ok(())
//! # }
//! ```

mod assemble;
mod scan;
mod set;


pub use assemble::{assemble, assemble_into, pack};
pub use scan::{ScanReport, SkippedSprite, scan, unpack};
pub use set::SpriteSet;

use crate::error::ArchiveError;

/// Name of the shared index table entry
pub const INDEX_NAME: &str = "index.dat";

/// Storage slot of the texture archive
pub const TEXTURE_ARCHIVE: u32 = 6;

/// Highest sprite id an archive may hold; scanning probes no further
pub const MAX_PROBE_ID: u32 = 0xFFFF;

/// Returns the payload entry name for a sprite id
pub fn payload_name(id: u32) -> String {
	format!("{id}.dat")
}

/// Rejects ids that [`scan`] would never reach
pub(crate) fn check_id(id: u32) -> Result<(), ArchiveError> {
	if id > MAX_PROBE_ID {
		return Err(ArchiveError::IdOutOfRange {
			id,
			max: MAX_PROBE_ID,
		});
	}
	Ok(())
}
