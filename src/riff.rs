//! RIFF container walking.
//!
//! An .sf2 file is laid out as
//! ```text
//! RIFF <size> sfbk
//!     LIST <size> INFO   (ifil, isng, INAM, ...)
//!     LIST <size> sdta   (smpl, optionally sm24)
//!     LIST <size> pdta   (phdr pbag pmod pgen inst ibag imod igen shdr)
//! ```
//! Nothing in here looks inside the record arrays; it only hands out byte ranges.
use crate::error::FramingError;
use std::ops::Range;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl std::fmt::Debug for FourCC {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
		write!(f, "FourCC({})", self)
	}
}

impl std::fmt::Display for FourCC {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
		for &b in self.0.iter() {
			// garbage tags still need to be printable in error messages
			let c = if b.is_ascii_graphic() || b == b' ' {
				b as char
			} else {
				'?'
			};
			write!(f, "{}", c)?;
		}
		Ok(())
	}
}

impl FourCC {
	fn at(data: &[u8], offset: usize) -> Self {
		FourCC([
			data[offset],
			data[offset + 1],
			data[offset + 2],
			data[offset + 3],
		])
	}
}

pub const fn fourcc(s: &str) -> FourCC {
	let bytes = s.as_bytes();
	if bytes.len() != 4 {
		panic!("bad fourcc");
	}
	FourCC([bytes[0], bytes[1], bytes[2], bytes[3]])
}

pub const RIFF: FourCC = fourcc("RIFF");
pub const SFBK: FourCC = fourcc("sfbk");
pub const LIST: FourCC = fourcc("LIST");
pub const INFO: FourCC = fourcc("INFO");
pub const SDTA: FourCC = fourcc("sdta");
pub const SMPL: FourCC = fourcc("smpl");
pub const PDTA: FourCC = fourcc("pdta");
pub const PHDR: FourCC = fourcc("phdr");
pub const PBAG: FourCC = fourcc("pbag");
pub const PMOD: FourCC = fourcc("pmod");
pub const PGEN: FourCC = fourcc("pgen");
pub const INST: FourCC = fourcc("inst");
pub const IBAG: FourCC = fourcc("ibag");
pub const IMOD: FourCC = fourcc("imod");
pub const IGEN: FourCC = fourcc("igen");
pub const SHDR: FourCC = fourcc("shdr");

/// A tagged byte range of the file. `offset` is where `data` starts in the whole file.
#[derive(Clone, Copy, Debug)]
pub struct Chunk<'a> {
	pub id: FourCC,
	pub offset: usize,
	pub data: &'a [u8],
}

impl Chunk<'_> {
	pub fn range(&self) -> Range<usize> {
		self.offset..self.offset + self.data.len()
	}
}

/// The nine record arrays of the pdta list, in file order.
#[derive(Clone, Copy, Debug)]
pub struct HydraChunks<'a> {
	pub phdr: Chunk<'a>,
	pub pbag: Chunk<'a>,
	pub pmod: Chunk<'a>,
	pub pgen: Chunk<'a>,
	pub inst: Chunk<'a>,
	pub ibag: Chunk<'a>,
	pub imod: Chunk<'a>,
	pub igen: Chunk<'a>,
	pub shdr: Chunk<'a>,
}

#[derive(Clone, Copy, Debug)]
pub struct Container<'a> {
	/// body of LIST INFO (after the form type)
	pub info: Chunk<'a>,
	/// body of LIST sdta. never decoded.
	pub sdta: Chunk<'a>,
	/// the smpl chunk inside sdta, if there is one
	pub smpl: Option<Chunk<'a>>,
	pub hydra: HydraChunks<'a>,
}

/// Sequential reader over the sub-chunks of a chunk body.
pub struct ChunkReader<'a> {
	data: &'a [u8],
	base: usize,
	pos: usize,
}

impl<'a> ChunkReader<'a> {
	pub fn new(chunk: Chunk<'a>) -> Self {
		ChunkReader {
			data: chunk.data,
			base: chunk.offset,
			pos: 0,
		}
	}

	fn remaining(&self) -> usize {
		self.data.len() - self.pos
	}

	/// read any chunk, whatever its tag. `expected` only names it in errors.
	// odd sizes are taken as-is, with no pad byte skipped after the body
	fn read_any(&mut self, expected: FourCC) -> Result<Chunk<'a>, FramingError> {
		if self.remaining() < 8 {
			return Err(FramingError::Truncated { expected });
		}
		let id = FourCC::at(self.data, self.pos);
		let size = read_u32_at(self.data, self.pos + 4);
		self.pos += 8;
		if size as usize > self.remaining() {
			return Err(FramingError::Overrun {
				tag: id,
				declared: size,
				remaining: self.remaining(),
			});
		}
		let start = self.pos;
		self.pos += size as usize;
		Ok(Chunk {
			id,
			offset: self.base + start,
			data: &self.data[start..self.pos],
		})
	}

	/// read the next chunk, which must be tagged `expected`.
	pub fn read_chunk(&mut self, expected: FourCC) -> Result<Chunk<'a>, FramingError> {
		if self.remaining() >= 4 {
			let found = FourCC::at(self.data, self.pos);
			if found != expected {
				return Err(FramingError::UnexpectedTag { expected, found });
			}
		}
		self.read_any(expected)
	}

	/// read a LIST chunk with the given form type, returning its body
	/// (the chunk's id is the form type).
	pub fn read_list(&mut self, form: FourCC) -> Result<Chunk<'a>, FramingError> {
		let list = self.read_chunk(LIST)?;
		if list.data.len() < 4 {
			return Err(FramingError::Truncated { expected: form });
		}
		let found = FourCC::at(list.data, 0);
		if found != form {
			return Err(FramingError::UnexpectedTag {
				expected: form,
				found,
			});
		}
		Ok(Chunk {
			id: form,
			offset: list.offset + 4,
			data: &list.data[4..],
		})
	}
}

impl<'a> Iterator for ChunkReader<'a> {
	type Item = Result<Chunk<'a>, FramingError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining() == 0 {
			return None;
		}
		let result = self.read_any(fourcc("????"));
		if result.is_err() {
			// don't keep reporting the same broken header
			self.pos = self.data.len();
		}
		Some(result)
	}
}

fn read_u32_at(data: &[u8], offset: usize) -> u32 {
	u32::from_le_bytes([
		data[offset],
		data[offset + 1],
		data[offset + 2],
		data[offset + 3],
	])
}

/// Validate the outer framing and locate every chunk the decoder needs.
pub fn read_container(data: &[u8]) -> Result<Container<'_>, FramingError> {
	if data.len() < 12 {
		return Err(FramingError::Truncated { expected: RIFF });
	}
	let riff = FourCC::at(data, 0);
	if riff != RIFF {
		// definitely not a soundfont
		return Err(FramingError::UnexpectedTag {
			expected: RIFF,
			found: riff,
		});
	}
	let riff_size = read_u32_at(data, 4);
	if riff_size as usize != data.len() - 8 {
		return Err(FramingError::SizeMismatch {
			declared: riff_size,
			actual: data.len() - 8,
		});
	}
	let sfbk = FourCC::at(data, 8);
	if sfbk != SFBK {
		// could be a WAV file, for example.
		return Err(FramingError::UnexpectedTag {
			expected: SFBK,
			found: sfbk,
		});
	}

	let mut body = ChunkReader::new(Chunk {
		id: SFBK,
		offset: 12,
		data: &data[12..],
	});
	let info = body.read_list(INFO)?;
	let sdta = body.read_list(SDTA)?;
	let pdta = body.read_list(PDTA)?;
	if body.remaining() > 0 {
		tracing::debug!("ignoring {} bytes after the pdta list", body.remaining());
	}

	// the sample data is skipped, but remember where smpl is.
	let smpl = ChunkReader::new(sdta)
		.map_while(Result::ok)
		.find(|chunk| chunk.id == SMPL);

	let mut pdta = ChunkReader::new(pdta);
	let hydra = HydraChunks {
		phdr: pdta.read_chunk(PHDR)?,
		pbag: pdta.read_chunk(PBAG)?,
		pmod: pdta.read_chunk(PMOD)?,
		pgen: pdta.read_chunk(PGEN)?,
		inst: pdta.read_chunk(INST)?,
		ibag: pdta.read_chunk(IBAG)?,
		imod: pdta.read_chunk(IMOD)?,
		igen: pdta.read_chunk(IGEN)?,
		shdr: pdta.read_chunk(SHDR)?,
	};

	tracing::debug!(
		"INFO: {} bytes, sdta: {} bytes, smpl: {:?}",
		info.data.len(),
		sdta.data.len(),
		smpl.map(|c| c.range())
	);

	Ok(Container {
		info,
		sdta,
		smpl,
		hydra,
	})
}
