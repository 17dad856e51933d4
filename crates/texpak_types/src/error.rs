//! Error types for texture encoding, index tables and archive containers.

use thiserror::Error;

/// Errors raised while building palettes or encoding/decoding sprite pixels
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
	/// Image holds more distinct colors than a palette can address
	#[error("Palette overflow: image has {colors} distinct colors (limit is {limit})")]
	PaletteOverflow {
		/// Distinct colors found in the image, background included
		colors: usize,
		/// Maximum palette size
		limit: usize,
	},

	/// Pixel buffer does not match the declared dimensions
	#[error("Pixel count mismatch: expected {expected} pixels, got {actual}")]
	PixelCountMismatch {
		/// `width * height`
		expected: usize,
		/// Number of pixels supplied
		actual: usize,
	},

	/// Payload byte references a palette slot that does not exist
	#[error("Palette index {index} out of range (palette holds {palette_len} colors)")]
	PaletteIndexOutOfRange {
		/// Offending slot
		index: u8,
		/// Number of colors in the palette
		palette_len: usize,
	},

	/// Payload is too short to hold its index offset header
	#[error("Payload too short: expected at least {expected} bytes, got {actual} bytes")]
	PayloadTooShort {
		/// Minimum payload size
		expected: usize,
		/// Actual payload size
		actual: usize,
	},

	/// Image dimensions fall outside the accepted import window
	#[error("Dimensions {width}x{height} out of range (each side must be within {min}-{max})")]
	DimensionsOutOfRange {
		/// Image width
		width: u16,
		/// Image height
		height: u16,
		/// Smallest accepted side
		min: u16,
		/// Largest accepted side
		max: u16,
	},

	/// Palette color list is malformed
	#[error("Invalid palette: {0}")]
	InvalidPalette(String),
}

/// Errors raised by a corrupt or oversized `index.dat` table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
	/// Offset stored in a payload header points past the index table
	#[error("Index offset {offset} out of bounds (index.dat is {len} bytes)")]
	OffsetOutOfBounds {
		/// Offset read from the payload header
		offset: usize,
		/// Length of `index.dat`
		len: usize,
	},

	/// Record runs past the end of the index table
	#[error("Truncated index record at offset {offset}: needs {needed} bytes, index.dat is {len} bytes")]
	Truncated {
		/// Offset of the record
		offset: usize,
		/// Bytes the record requires from its offset
		needed: usize,
		/// Length of `index.dat`
		len: usize,
	},

	/// Index table grew past what a 16-bit payload header can address
	#[error("Index offset {offset} does not fit in a 16-bit payload header")]
	OffsetOverflow {
		/// Cursor position that overflowed
		offset: usize,
	},

	/// Record lists more colors than its count byte can hold
	#[error("Index record has {colors} colors; the count byte holds at most 255")]
	TooManyColors {
		/// Number of colors in the record
		colors: usize,
	},
}

/// Errors raised by the named-entry container and archive storage
#[derive(Debug, Error)]
pub enum ContainerError {
	/// Not enough data to parse
	#[error("Insufficient data: expected at least {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Archive or entry is stored compressed
	#[error("Compressed data is not supported (packed {packed} bytes, unpacked {unpacked} bytes)")]
	CompressedUnsupported {
		/// Packed size
		packed: usize,
		/// Unpacked size
		unpacked: usize,
	},

	/// Entry table cannot hold this many entries
	#[error("Too many entries: {0} (limit is 65535)")]
	TooManyEntries(usize),

	/// Entry or archive body does not fit a 24-bit size field
	#[error("Data too large: {0} bytes does not fit a 24-bit size field")]
	EntryTooLarge(usize),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Errors raised while assembling or scanning a texture archive
#[derive(Debug, Error)]
pub enum ArchiveError {
	/// A sprite failed to encode; nothing was written
	#[error("Assembly aborted at sprite {id}: {source}")]
	AssemblyAborted {
		/// Sprite that failed
		id: u32,
		/// Underlying codec failure
		#[source]
		source: CodecError,
	},

	/// Index table is corrupt or overflowed
	#[error(transparent)]
	Index(#[from] IndexError),

	/// Container failure
	#[error(transparent)]
	Container(#[from] ContainerError),

	/// Archive has no `index.dat` entry
	#[error("Archive has no index.dat entry")]
	MissingIndex,

	/// Storage slot is empty
	#[error("Archive slot {0} is empty")]
	MissingArchive(u32),

	/// Sprite id already present in the set
	#[error("Duplicate sprite id {0}")]
	DuplicateId(u32),

	/// Sprite id beyond the range a scan can recover
	#[error("Sprite id {id} is above the highest archive id {max}")]
	IdOutOfRange {
		/// Offending id
		id: u32,
		/// Highest accepted id
		max: u32,
	},
}

impl From<std::io::Error> for ArchiveError {
	fn from(err: std::io::Error) -> Self {
		Self::Container(ContainerError::Io(err))
	}
}
