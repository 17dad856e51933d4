//! Owned working set of sprites.

use std::collections::BTreeMap;
use std::collections::btree_map::Values;

use crate::error::ArchiveError;
use crate::texture::Sprite;

use super::{MAX_PROBE_ID, check_id};

/// Sprites keyed by id, iterated in ascending id order.
///
/// This is the collection handed between [`scan`](super::scan), whatever
/// edits the sprites, and [`assemble`](super::assemble).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpriteSet {
	sprites: BTreeMap<u32, Sprite>,
}

impl SpriteSet {
	/// Creates an empty set
	pub fn new() -> Self {
		Self::default()
	}

	/// Collects sprites into a set.
	///
	/// # Errors
	///
	/// Returns [`ArchiveError::DuplicateId`] on the first repeated id.
	pub fn try_from_sprites(sprites: impl IntoIterator<Item = Sprite>) -> Result<Self, ArchiveError> {
		let mut set = Self::new();
		for sprite in sprites {
			set.insert(sprite)?;
		}
		Ok(set)
	}

	/// Adds a sprite under its id.
	///
	/// # Errors
	///
	/// Returns [`ArchiveError::DuplicateId`] if the id is taken; use
	/// [`replace`](Self::replace) to overwrite. Returns
	/// [`ArchiveError::IdOutOfRange`] for ids above
	/// [`MAX_PROBE_ID`](super::MAX_PROBE_ID).
	pub fn insert(&mut self, sprite: Sprite) -> Result<(), ArchiveError> {
		check_id(sprite.id)?;
		if self.sprites.contains_key(&sprite.id) {
			return Err(ArchiveError::DuplicateId(sprite.id));
		}
		self.sprites.insert(sprite.id, sprite);
		Ok(())
	}

	/// Stores a sprite under its id, returning the one it replaced.
	///
	/// # Errors
	///
	/// Returns [`ArchiveError::IdOutOfRange`] for ids above
	/// [`MAX_PROBE_ID`](super::MAX_PROBE_ID).
	pub fn replace(&mut self, sprite: Sprite) -> Result<Option<Sprite>, ArchiveError> {
		check_id(sprite.id)?;
		Ok(self.sprites.insert(sprite.id, sprite))
	}

	/// Collects sprites recovered by a scan, whose ids are in range by construction
	pub(super) fn from_scanned(sprites: Vec<Sprite>) -> Self {
		Self {
			sprites: sprites.into_iter().map(|sprite| (sprite.id, sprite)).collect(),
		}
	}

	/// Removes and returns the sprite with `id`
	pub fn remove(&mut self, id: u32) -> Option<Sprite> {
		self.sprites.remove(&id)
	}

	/// Returns the sprite with `id`
	pub fn get(&self, id: u32) -> Option<&Sprite> {
		self.sprites.get(&id)
	}

	/// Edits the sprite with `id` in place. The sprite keeps its id whatever
	/// the closure does to it.
	pub fn modify<R>(&mut self, id: u32, f: impl FnOnce(&mut Sprite) -> R) -> Option<R> {
		let sprite = self.sprites.get_mut(&id)?;
		let result = f(sprite);
		sprite.id = id;
		Some(result)
	}

	/// Returns `true` if a sprite with `id` is present
	pub fn contains(&self, id: u32) -> bool {
		self.sprites.contains_key(&id)
	}

	/// Returns the smallest id not in use, or `None` once every id up to
	/// [`MAX_PROBE_ID`](super::MAX_PROBE_ID) is taken
	pub fn next_free_id(&self) -> Option<u32> {
		let mut candidate = 0;
		for &id in self.sprites.keys() {
			if id != candidate {
				break;
			}
			candidate += 1;
		}
		(candidate <= MAX_PROBE_ID).then_some(candidate)
	}

	/// Iterates sprites in ascending id order
	pub fn iter(&self) -> Values<'_, u32, Sprite> {
		self.sprites.values()
	}

	/// Iterates ids in ascending order
	pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
		self.sprites.keys().copied()
	}

	/// Returns the number of sprites
	pub fn len(&self) -> usize {
		self.sprites.len()
	}

	/// Returns `true` if the set is empty
	pub fn is_empty(&self) -> bool {
		self.sprites.is_empty()
	}

	/// Consumes the set, returning sprites in ascending id order
	pub fn into_vec(self) -> Vec<Sprite> {
		self.sprites.into_values().collect()
	}
}

impl<'a> IntoIterator for &'a SpriteSet {
	type Item = &'a Sprite;
	type IntoIter = Values<'a, u32, Sprite>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
