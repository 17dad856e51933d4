use md5::{Digest, Md5};
use texpak_rs::prelude::*;

use crate::{random_sprite, rng};

#[test_log::test]
fn random_sets_survive_serialization() {
	let mut rng = rng(0x7E47);

	for round in 0..8 {
		let mut set = SpriteSet::new();
		let mut id = 0;
		for _ in 0..12 {
			// leave gaps in the id sequence
			id += 1 + (round % 3);
			let colors = 1 + (id as usize * 17) % 120;
			set.insert(random_sprite(&mut rng, id, colors)).unwrap();
		}

		let bytes = assemble(&set).unwrap().to_bytes().unwrap();
		let archive = Archive::from_bytes(&bytes).unwrap();
		let report = scan(&archive).unwrap();

		assert!(report.skipped.is_empty());
		assert_eq!(report.unmatched, 0);
		assert_eq!(report.into_set(), set, "round {round}");
	}
}

#[test]
fn full_palette_survives() {
	let mut rng = rng(255);
	// slot 0 is the background, leaving MAX_COLORS - 1 for the image
	let sprite = random_sprite(&mut rng, 0, MAX_COLORS - 1);

	let archive = assemble([&sprite]).unwrap();
	let record = IndexRecord::parse_at(&archive.lookup_name(INDEX_NAME).unwrap().data, 0).unwrap();
	assert!(record.palette_len() <= MAX_COLORS);

	let report = scan(&archive).unwrap();
	assert_eq!(report.sprites, vec![sprite]);
}

#[test]
fn assembly_is_deterministic() {
	let mut rng = rng(42);
	let sprites: Vec<Sprite> = (0..6).map(|id| random_sprite(&mut rng, id, 32)).collect();
	let mut reversed = sprites.clone();
	reversed.reverse();

	let first = Md5::digest(assemble(&sprites).unwrap().to_bytes().unwrap());
	let second = Md5::digest(assemble(&reversed).unwrap().to_bytes().unwrap());
	assert_eq!(hex::encode(first), hex::encode(second));
}

#[test]
fn rebuilt_archive_matches_original() {
	let mut rng = rng(9);
	let sprites: Vec<Sprite> = [0, 3, 4, 10].into_iter().map(|id| random_sprite(&mut rng, id, 20)).collect();
	let original = assemble(&sprites).unwrap().to_bytes().unwrap();

	let report = scan(&Archive::from_bytes(&original).unwrap()).unwrap();
	let rebuilt = assemble(&report.sprites).unwrap().to_bytes().unwrap();
	assert_eq!(original, rebuilt);
}

#[test]
fn palette_order_follows_columns() {
	// 2x2: column 0 holds A then B, column 1 holds C then A
	let (a, b, c) = (0x00AA_0000, 0x0000_BB00, 0x0000_00CC);
	let sprite = Sprite::new(0, 2, 2, vec![a, c, b, a]).unwrap();

	let encoded = codec::encode(&sprite).unwrap();
	assert_eq!(encoded.record.colors, vec![a, b, c]);
	assert_eq!(encoded.record.color_count().unwrap(), 3);
	assert_eq!(encoded.pixels, vec![1, 3, 2, 1]);
}

#[test]
fn oversized_palette_names_the_sprite() {
	let pixels: Vec<u32> = (1..=256).collect();
	let sprites = vec![
		Sprite::new(0, 1, 1, vec![0]).unwrap(),
		Sprite::new(7, 16, 16, pixels).unwrap(),
	];

	let err = assemble(&sprites).unwrap_err();
	assert!(matches!(err, ArchiveError::AssemblyAborted { id: 7, .. }));
	assert!(err.to_string().contains('7'));
}

#[test]
fn index_hash_matches_known_value() {
	let expected = "index.dat".to_uppercase().chars().fold(0i32, |h, c| h.wrapping_mul(61).wrapping_add(c as i32 - 32));
	assert_eq!(name_hash(INDEX_NAME), expected);
	assert_eq!(name_hash("index.dat"), name_hash("INDEX.DAT"));
}
