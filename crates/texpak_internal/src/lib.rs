//! Re-export layer between the `texpak_rs` facade and `texpak_types`; use the facade instead of depending on this crate directly.

/// `use texpak_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export texpak_types for convenience
pub use texpak_types;

// Re-export commonly used types at crate root
pub use texpak_types::archive::{ScanReport, SpriteSet, TEXTURE_ARCHIVE};
pub use texpak_types::container::{Archive, ArchiveStore, Container, DirStore, MemoryStore};
pub use texpak_types::error::{ArchiveError, CodecError, ContainerError, IndexError};
pub use texpak_types::texture::{ScanOrder, Sprite};
