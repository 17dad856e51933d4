//! This crate provides the texture formats of the `texpak-rs` project.
//!
//! # Formats
//!
//! - **Sprite**: palette-indexed RGB bitmaps with at most 255 colors, stored in
//!   horizontal or vertical scan order
//! - **`index.dat`**: shared table of per-sprite geometry and palettes
//! - **Archive**: hashed-name container bundling `index.dat` with one
//!   `{id}.dat` payload per sprite
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use texpak_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sprite = Sprite::new(0, 2, 2, vec![0, 0xFF00FF, 0xFF00FF, 0])?;
//! let archive = assemble(&[sprite])?;
//! assert_eq!(archive.entry_count(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use texpak_types::archive::{self, SpriteSet};
//! use texpak_types::container::DirStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = DirStore::new("cache");
//! let report = archive::unpack(&store, archive::TEXTURE_ARCHIVE)?;
//! let sprites: SpriteSet = report.into_set();
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod container;
pub mod error;
pub mod index;
pub mod texture;

/// `use texpak_types::prelude::*;` to import commonly used items.
pub mod prelude;
