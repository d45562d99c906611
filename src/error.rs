use crate::riff::FourCC;

/// Problems with the RIFF framing of the file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FramingError {
	#[error("expected ID '{expected}' not found (found '{found}')")]
	UnexpectedTag { expected: FourCC, found: FourCC },

	#[error("file is incomplete: RIFF size is {declared} but file has {actual} bytes after the header")]
	SizeMismatch { declared: u32, actual: usize },

	#[error("chunk '{tag}' declares {declared} bytes, but only {remaining} remain")]
	Overrun {
		tag: FourCC,
		declared: u32,
		remaining: usize,
	},

	#[error("file ends in the middle of a chunk header (expected '{expected}')")]
	Truncated { expected: FourCC },
}

/// Everything that can go wrong while decoding a sound font.
/// None of these are recoverable: the whole file is rejected.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("file format error: {0}")]
	Framing(#[from] FramingError),

	#[error("{label} sub-chunk ('{tag}') is not present")]
	MissingMetadata { tag: FourCC, label: &'static str },

	#[error("bad '{tag}' sub-chunk ({len} bytes)")]
	MalformedInfo { tag: FourCC, len: usize },

	#[error("bad '{tag}' chunk size ({len} should be a non-zero multiple of {width})")]
	MalformedArray { tag: FourCC, len: usize, width: usize },

	#[error("unknown generator operator {0}")]
	UnknownGenerator(u16),

	#[error("unknown sample type 0x{0:04x}")]
	UnknownSampleType(u16),

	#[error("{what} index {index} out of range ({len} available)")]
	IndexOutOfRange {
		what: &'static str,
		index: usize,
		len: usize,
	},

	#[error("two '{tag}' records share the start index {index}")]
	DuplicateStartIndex { tag: FourCC, index: u16 },
}

pub type Result<T> = std::result::Result<T, Error>;
