//! Prelude module for `texpak_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use texpak_internal::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut set = SpriteSet::new();
//! set.insert(Sprite::new(0, 1, 1, vec![0xFF00FF])?)?;
//!
//! let mut store = MemoryStore::new();
//! pack(&set, &mut store, TEXTURE_ARCHIVE)?;
//! assert_eq!(unpack(&store, TEXTURE_ARCHIVE)?.sprites.len(), 1);
//! # Ok(())
//! # }
//! ```

// Re-export everything from texpak_types::prelude
#[doc(inline)]
pub use texpak_types::prelude::*;

// Re-export the entire texpak_types module for advanced usage
#[doc(inline)]
pub use texpak_types;
