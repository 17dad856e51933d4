#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `texpak-rs` reads and writes palette-indexed sprite textures and the
//! hashed-name archives that bundle them.
//!
//! ```
//! use texpak_rs::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sprite = Sprite::new(0, 2, 1, vec![0x000000, 0xFF00FF])?;
//! let archive = assemble(&[sprite.clone()])?;
//! assert_eq!(scan(&archive)?.sprites, vec![sprite]);
//! # Ok(())
//! # }
//! ```
pub use texpak_internal::*;
