//! Texture archive CLI Utility
//!
//! A command-line tool for inspecting, extracting, building and verifying
//! texture archives.
//!
//! # Features
//!
//! - **info**: List the entries and sprites of an archive
//! - **unpack**: Extract every sprite to a PNG image plus a JSON manifest
//! - **pack**: Build an archive from PNG images (and an optional manifest)
//! - **verify**: Check that rebuilding an archive reproduces it byte for byte
//! - **hash**: Print entry name hashes
//!
//! # Manifest Format
//!
//! ```json
//! {
//!   "sprite_count": 1,
//!   "sprites": [
//!     {
//!       "id": 0,
//!       "width": 64,
//!       "height": 64,
//!       "offset_x": 0,
//!       "offset_y": 0,
//!       "resize_width": 64,
//!       "resize_height": 64,
//!       "format": "horizontal",
//!       "colors": 2,
//!       "filename": "0.png"
//!     }
//!   ]
//! }
//! ```
//!
//! Without a manifest, `pack` picks up every `<id>.png` in the input directory.
//! Manifest entries whose image keeps its recorded size skip the dimension
//! window; new images must fit it unless `--no-limits` is given.
//!
//! # Configuration
//!
//! `--config texpak.toml` (or `TEXPAK_*` environment variables) may set:
//! - `archive_id`: storage slot used with `--store` (default 6)
//! - `min_dimension` / `max_dimension`: accepted image sides (default 64-128)
//!
//! # Usage
//!
//! ```bash
//! cargo run --example texture_utils -- info textures.jag --detailed
//! cargo run --example texture_utils -- unpack textures.jag -o textures/
//! cargo run --example texture_utils -- pack textures/ rebuilt.jag
//! cargo run --example texture_utils -- pack textures/ cache/ --store
//! cargo run --example texture_utils -- verify textures.jag
//! cargo run --example texture_utils -- hash index.dat 0.dat
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use image::RgbImage;
use log::{info, warn};
use md5::{Digest, Md5};
use regex::Regex;
use serde::{Deserialize, Serialize};
use texpak_rs::prelude::*;

#[derive(Parser)]
#[command(name = "texture_utils")]
#[command(author = "texpak-rs project")]
#[command(version = "1.0")]
#[command(about = "Texture archive utility - inspect, unpack, pack and verify texture archives", long_about = None)]
struct Cli {
	/// Optional TOML configuration file
	#[arg(short, long, global = true, value_name = "CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Show the contents of an archive
	Info {
		/// Input archive path
		#[arg(value_name = "ARCHIVE")]
		input: PathBuf,

		/// Show per-sprite details
		#[arg(short, long)]
		detailed: bool,

		/// Dump raw index records as hex
		#[arg(long)]
		dump: bool,
	},

	/// Extract every sprite to PNG images plus a manifest
	Unpack {
		/// Input archive path
		#[arg(value_name = "ARCHIVE")]
		input: PathBuf,

		/// Output directory (defaults to `<archive>_sprites/`)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,
	},

	/// Build an archive from PNG images
	Pack {
		/// Directory containing `<id>.png` files and an optional manifest.json
		#[arg(value_name = "INPUT_DIR")]
		input: PathBuf,

		/// Output archive path, or store directory with `--store`
		#[arg(value_name = "OUTPUT")]
		output: PathBuf,

		/// Write into the configured slot of a store directory
		#[arg(short, long)]
		store: bool,

		/// Scan order for images without a manifest entry
		#[arg(short, long, value_enum, default_value_t = FormatArg::Horizontal)]
		format: FormatArg,

		/// Skip the image dimension checks
		#[arg(long)]
		no_limits: bool,
	},

	/// Rebuild an archive in memory and compare it with the original
	Verify {
		/// Input archive path
		#[arg(value_name = "ARCHIVE")]
		input: PathBuf,
	},

	/// Print container name hashes
	Hash {
		/// Entry names
		#[arg(value_name = "NAME", required = true)]
		names: Vec<String>,
	},
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
	Horizontal,
	Vertical,
}

impl From<FormatArg> for ScanOrder {
	fn from(value: FormatArg) -> Self {
		match value {
			FormatArg::Horizontal => ScanOrder::Horizontal,
			FormatArg::Vertical => ScanOrder::Vertical,
		}
	}
}

/// Settings loaded from `--config` and `TEXPAK_*` variables
#[derive(Debug, Clone, Deserialize)]
struct Settings {
	archive_id: u32,
	min_dimension: u16,
	max_dimension: u16,
}

impl Settings {
	fn load(path: Option<&Path>) -> anyhow::Result<Self> {
		let mut builder = config::Config::builder()
			.set_default("archive_id", TEXTURE_ARCHIVE as i64)?
			.set_default("min_dimension", 64i64)?
			.set_default("max_dimension", 128i64)?;

		if let Some(path) = path {
			builder = builder.add_source(config::File::from(path));
		}

		let settings = builder
			.add_source(config::Environment::with_prefix("TEXPAK"))
			.build()?
			.try_deserialize()?;
		Ok(settings)
	}

	fn import_limits(&self) -> ImportLimits {
		ImportLimits {
			min_dimension: self.min_dimension,
			max_dimension: self.max_dimension,
			..ImportLimits::default()
		}
	}

	/// Picks the limits for one image. A manifest entry whose image still has
	/// the recorded size came out of an archive and only has to fit the codec;
	/// anything else is a fresh import and gets the dimension window.
	fn limits_for(&self, meta: &SpriteMetadata, sprite: &Sprite, from_manifest: bool) -> ImportLimits {
		let exported = from_manifest && (meta.width, meta.height) == (sprite.width(), sprite.height());
		if exported {
			ImportLimits::unrestricted()
		} else {
			self.import_limits()
		}
	}
}

/// Sprite metadata for JSON serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpriteMetadata {
	id: u32,
	width: u16,
	height: u16,
	offset_x: u8,
	offset_y: u8,
	resize_width: u16,
	resize_height: u16,
	format: ScanOrder,
	colors: usize,
	filename: String,
}

impl From<&Sprite> for SpriteMetadata {
	fn from(sprite: &Sprite) -> Self {
		Self {
			id: sprite.id,
			width: sprite.width(),
			height: sprite.height(),
			offset_x: sprite.offset_x,
			offset_y: sprite.offset_y,
			resize_width: sprite.resize_width,
			resize_height: sprite.resize_height,
			format: sprite.format,
			colors: sprite.distinct_colors(),
			filename: format!("{}.png", sprite.id),
		}
	}
}

/// Complete archive manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Manifest {
	sprite_count: usize,
	sprites: Vec<SpriteMetadata>,
}

const MANIFEST_NAME: &str = "manifest.json";

fn read_archive(path: &Path) -> anyhow::Result<Archive> {
	Archive::open(path).with_context(|| format!("Cannot open archive {}", path.display()))
}

fn save_sprite_png(sprite: &Sprite, path: &Path) -> anyhow::Result<()> {
	let img = RgbImage::from_raw(sprite.width() as u32, sprite.height() as u32, sprite.to_rgb_bytes())
		.context("Failed to create sprite image")?;
	img.save(path)?;
	Ok(())
}

fn load_sprite_png(id: u32, path: &Path) -> anyhow::Result<Sprite> {
	let img = image::open(path).with_context(|| format!("Cannot read {}", path.display()))?.to_rgb8();
	let width = u16::try_from(img.width()).context("Image too wide")?;
	let height = u16::try_from(img.height()).context("Image too tall")?;
	Ok(Sprite::from_rgb_bytes(id, width, height, img.as_raw())?)
}

/// Collects `<id>.png` files when no manifest is present
fn discover_sprites(dir: &Path, format: ScanOrder) -> anyhow::Result<Vec<SpriteMetadata>> {
	let pattern = Regex::new(r"^(\d+)\.png$")?;
	let mut found = Vec::new();

	for entry in fs::read_dir(dir)? {
		let name = entry?.file_name().to_string_lossy().into_owned();
		let Some(captures) = pattern.captures(&name) else {
			continue;
		};
		let id: u32 = captures[1].parse()?;
		found.push(SpriteMetadata {
			id,
			width: 0,
			height: 0,
			offset_x: 0,
			offset_y: 0,
			resize_width: 0,
			resize_height: 0,
			format,
			colors: 0,
			filename: name,
		});
	}

	found.sort_by_key(|meta| meta.id);
	Ok(found)
}

fn handle_info(input: PathBuf, detailed: bool, dump: bool) -> anyhow::Result<()> {
	let archive = read_archive(&input)?;
	println!("{}", archive);

	let index_size = archive.lookup_name(INDEX_NAME).map_or(0, |entry| entry.data.len());
	println!("   index.dat: {} bytes", index_size);

	let report = scan(&archive)?;
	println!("   Sprites: {} decoded, {} skipped", report.sprites.len(), report.skipped.len());
	if report.unmatched > 0 {
		println!("   ⚠ {} entries matched no sprite id", report.unmatched);
	}

	if detailed {
		for sprite in &report.sprites {
			println!("   {} - {} colors", sprite, sprite.distinct_colors());
		}
		for skipped in &report.skipped {
			println!("   Sprite #{}: ✗ {}", skipped.id, skipped.error);
		}
	}

	if dump {
		let table = IndexTable::from_bytes(
			archive.lookup_name(INDEX_NAME).map(|entry| entry.data.clone()).unwrap_or_default(),
		);
		for result in table.records() {
			match result {
				Ok((offset, record)) => {
					println!("   @{:5}: {}", offset, record);
					println!("          {}", hex::encode_upper(record.to_bytes()?));
				}
				Err(e) => println!("   ✗ {}", e),
			}
		}
	}

	Ok(())
}

fn handle_unpack(input: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
	let output_dir = output.unwrap_or_else(|| {
		let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
		input.with_file_name(format!("{stem}_sprites"))
	});

	let archive = read_archive(&input)?;
	let report = scan(&archive)?;
	for skipped in &report.skipped {
		warn!("Sprite {} not exported: {}", skipped.id, skipped.error);
	}

	fs::create_dir_all(&output_dir)?;

	let mut manifest = Manifest {
		sprite_count: report.sprites.len(),
		sprites: Vec::with_capacity(report.sprites.len()),
	};

	for sprite in &report.sprites {
		let metadata = SpriteMetadata::from(sprite);
		save_sprite_png(sprite, &output_dir.join(&metadata.filename))?;
		manifest.sprites.push(metadata);
	}

	let manifest_path = output_dir.join(MANIFEST_NAME);
	fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

	println!(
		"✓ Unpacked {} -> {} ({} sprites)",
		input.display(),
		output_dir.display(),
		manifest.sprite_count
	);
	Ok(())
}

fn handle_pack(
	input: PathBuf,
	output: PathBuf,
	to_store: bool,
	format: ScanOrder,
	no_limits: bool,
	settings: &Settings,
) -> anyhow::Result<()> {
	let manifest_path = input.join(MANIFEST_NAME);
	let (entries, from_manifest) = if manifest_path.exists() {
		let manifest: Manifest = serde_json::from_str(&fs::read_to_string(&manifest_path)?)?;
		(manifest.sprites, true)
	} else {
		(discover_sprites(&input, format)?, false)
	};

	if entries.is_empty() {
		bail!("No sprites found in {}", input.display());
	}

	let mut set = SpriteSet::new();
	for meta in entries {
		let mut sprite = load_sprite_png(meta.id, &input.join(&meta.filename))?.with_format(meta.format);
		if from_manifest {
			sprite = sprite
				.with_resize(meta.resize_width, meta.resize_height)
				.with_offsets(meta.offset_x, meta.offset_y);
		}

		let limits = if no_limits {
			ImportLimits::unrestricted()
		} else {
			settings.limits_for(&meta, &sprite, from_manifest)
		};
		limits.check(&sprite).with_context(|| format!("Image {} rejected", meta.filename))?;
		set.insert(sprite)?;
	}

	if to_store {
		let mut store = DirStore::new(&output);
		let size = pack(&set, &mut store, settings.archive_id)?;
		println!(
			"✓ Packed {} sprites into {} ({} bytes)",
			set.len(),
			store.slot_path(settings.archive_id).display(),
			size
		);
	} else {
		let archive = assemble(&set)?;
		archive.save(&output)?;
		println!("✓ Packed {} sprites into {}", set.len(), output.display());
	}

	Ok(())
}

fn handle_verify(input: PathBuf) -> anyhow::Result<()> {
	let original = fs::read(&input)?;
	let archive = Archive::from_bytes(&original)?;
	let report = scan(&archive)?;

	if !report.skipped.is_empty() || report.unmatched > 0 {
		bail!(
			"{} sprites failed to decode, {} entries unmatched",
			report.skipped.len(),
			report.unmatched
		);
	}

	let rebuilt = assemble(&report.sprites)?.to_bytes()?;
	let before = Md5::digest(&original);
	let after = Md5::digest(&rebuilt);

	println!("   Original: {} bytes, md5 {}", original.len(), hex::encode(before));
	println!("   Rebuilt:  {} bytes, md5 {}", rebuilt.len(), hex::encode(after));

	if before != after {
		bail!("Rebuilt archive differs from {}", input.display());
	}

	println!("✓ {} sprites verified", report.sprites.len());
	Ok(())
}

fn handle_hash(names: &[String]) {
	for name in names {
		let hash = name_hash(name);
		println!("{:>12} {:08X} {}", hash, hash, name);
	}
}

fn main() -> anyhow::Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let settings = Settings::load(cli.config.as_deref())?;
	info!("Using archive slot {}", settings.archive_id);

	match cli.command {
		Commands::Info {
			input,
			detailed,
			dump,
		} => handle_info(input, detailed, dump),

		Commands::Unpack {
			input,
			output,
		} => handle_unpack(input, output),

		Commands::Pack {
			input,
			output,
			store,
			format,
			no_limits,
		} => handle_pack(input, output, store, format.into(), no_limits, &settings),

		Commands::Verify {
			input,
		} => handle_verify(input),

		Commands::Hash {
			names,
		} => {
			handle_hash(&names);
			Ok(())
		}
	}
}
