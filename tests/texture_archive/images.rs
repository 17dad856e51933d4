use std::io::Cursor;

use image::{ImageFormat, RgbImage};
use texpak_rs::prelude::*;

use crate::{random_sprite, rng};

fn to_png(sprite: &Sprite) -> Vec<u8> {
	let img = RgbImage::from_raw(sprite.width() as u32, sprite.height() as u32, sprite.to_rgb_bytes()).unwrap();
	let mut buf = Vec::new();
	img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
	buf
}

fn from_png(id: u32, data: &[u8]) -> Sprite {
	let img = image::load_from_memory(data).unwrap().to_rgb8();
	Sprite::from_rgb_bytes(id, img.width() as u16, img.height() as u16, img.as_raw()).unwrap()
}

#[test]
fn png_roundtrip_preserves_pixels() {
	let mut rng = rng(11);
	let sprite = random_sprite(&mut rng, 4, 50);

	let decoded = from_png(4, &to_png(&sprite));
	assert_eq!(decoded.pixels(), sprite.pixels());
	assert_eq!((decoded.width(), decoded.height()), (sprite.width(), sprite.height()));
}

#[test]
fn import_limits_reject_small_images() {
	let limits = ImportLimits::default();
	let small = Sprite::new(0, 32, 32, vec![0; 32 * 32]).unwrap();
	let fits = Sprite::new(1, 64, 128, vec![0x123456; 64 * 128]).unwrap();

	assert!(matches!(limits.check(&small), Err(CodecError::DimensionsOutOfRange { .. })));
	assert!(limits.check(&fits).is_ok());
	assert!(ImportLimits::unrestricted().check(&small).is_ok());
}

#[test]
fn imported_image_packs_and_decodes() {
	let pixels: Vec<u32> = (0..64 * 64).map(|i| if (i / 64 + i % 64) % 2 == 0 { 0 } else { 0xFF00FF }).collect();
	let sprite = Sprite::new(0, 64, 64, pixels).unwrap();
	let imported = from_png(0, &to_png(&sprite));
	ImportLimits::default().check(&imported).unwrap();

	let archive = assemble([&imported]).unwrap();
	let index = &archive.lookup_name(INDEX_NAME).unwrap().data;
	let record = IndexRecord::parse_at(index, 0).unwrap();
	assert_eq!(record.colors, vec![0xFF00FF]);
	assert_eq!(hex::encode(&index[4..5]), "01");

	assert_eq!(scan(&archive).unwrap().sprites, vec![sprite]);
}
