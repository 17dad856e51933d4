use std::fs;
use std::path::PathBuf;

use texpak_rs::prelude::*;

use crate::{random_sprite, rng};

/// Fresh scratch directory per test
fn scratch_dir(name: &str) -> PathBuf {
	let dir = std::env::temp_dir().join(format!("texpak-{}-{}", std::process::id(), name));
	let _ = fs::remove_dir_all(&dir);
	fs::create_dir_all(&dir).unwrap();
	dir
}

#[test_log::test]
fn dir_store_roundtrip() {
	let dir = scratch_dir("roundtrip");
	let mut store = DirStore::new(&dir);

	let mut rng = rng(3);
	let set = SpriteSet::try_from_sprites((0..5).map(|id| random_sprite(&mut rng, id, 10))).unwrap();

	let size = pack(&set, &mut store, TEXTURE_ARCHIVE).unwrap();
	let path = store.slot_path(TEXTURE_ARCHIVE);
	assert_eq!(fs::metadata(&path).unwrap().len() as usize, size);

	let report = unpack(&store, TEXTURE_ARCHIVE).unwrap();
	assert_eq!(report.into_set(), set);

	fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn dir_store_missing_slot() {
	let dir = scratch_dir("missing");
	let store = DirStore::new(&dir);

	assert!(matches!(unpack(&store, 11), Err(ArchiveError::MissingArchive(11))));

	fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn repack_replaces_previous_contents() {
	let mut store = MemoryStore::new();
	let mut rng = rng(5);

	let mut set = SpriteSet::try_from_sprites((0..3).map(|id| random_sprite(&mut rng, id, 4))).unwrap();
	pack(&set, &mut store, TEXTURE_ARCHIVE).unwrap();

	set.remove(1);
	let id = set.next_free_id().unwrap();
	assert_eq!(id, 1);
	set.insert(random_sprite(&mut rng, id, 6)).unwrap();
	pack(&set, &mut store, TEXTURE_ARCHIVE).unwrap();

	assert_eq!(store.len(), 1);
	assert_eq!(unpack(&store, TEXTURE_ARCHIVE).unwrap().into_set(), set);
}

#[test]
fn assemble_into_existing_archive() {
	let mut archive = Archive::new();
	archive.write_file("readme.txt", b"textures".to_vec());

	let mut rng = rng(8);
	let sprites: Vec<Sprite> = (0..2).map(|id| random_sprite(&mut rng, id, 3)).collect();
	assemble_into(&sprites, &mut archive).unwrap();

	let report = scan(&archive).unwrap();
	assert_eq!(report.sprites, sprites);
	assert_eq!(report.unmatched, 1);
}
