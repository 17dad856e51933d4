//! Prelude module for `texpak_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and functions.
//!
//! # Examples
//!
//! ```
//! use texpak_types::prelude::*;
//!
//! let set = SpriteSet::new();
//! assert_eq!(set.next_free_id(), Some(0));
//! ```

// Archive
#[doc(inline)]
pub use crate::archive::{
	INDEX_NAME, MAX_PROBE_ID, ScanReport, SkippedSprite, SpriteSet, TEXTURE_ARCHIVE, assemble,
	assemble_into, pack, payload_name, scan, unpack,
};

// Containers and storage
#[doc(inline)]
pub use crate::container::{Archive, ArchiveStore, Container, DirStore, Entry, MemoryStore, name_hash};

// Errors
#[doc(inline)]
pub use crate::error::{ArchiveError, CodecError, ContainerError, IndexError};

// Index table
#[doc(inline)]
pub use crate::index::{IndexRecord, IndexTable};

// Textures
#[doc(inline)]
pub use crate::texture::{EncodedSprite, ImportLimits, MAX_COLORS, Palette, ScanOrder, Sprite, codec};
