//! The fixed-width record arrays of the pdta list ("hydra").
//!
//! Every array ends with a terminal record (EOP, EOI, EOS or an all-zero
//! zone/generator/modulator). It only marks the end of the array and is never
//! part of the decoded sequence.
use crate::error::{Error, Result};
use crate::generator::{Generator, GeneratorOperator};
use crate::riff::{Chunk, HydraChunks};
use std::io::{Cursor, Read};

/// A fixed-width record layout.
pub trait Record: Sized {
	/// width of one record in bytes
	const SIZE: usize;

	fn read(r: &mut Cursor<&[u8]>) -> Result<Self>;

	/// append exactly `SIZE` bytes
	fn write(&self, out: &mut Vec<u8>);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresetHeader {
	pub name: String,
	pub preset: u16,
	pub bank: u16,
	/// index of this preset's first zone in pbag
	pub zone_start: u16,
	// reserved by the standard
	pub library: u32,
	pub genre: u32,
	pub morphology: u32,
}

/// pbag / ibag record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Zone {
	pub gen_start: u16,
	pub mod_start: u16,
}

/// pmod / imod record. modulators are only carried through, never interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modulator {
	pub src_oper: u16,
	pub dest_oper: u16,
	pub amount: i16,
	pub amount_src_oper: u16,
	pub trans_oper: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstrumentHeader {
	pub name: String,
	/// index of this instrument's first zone in ibag
	pub zone_start: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum SampleType {
	Mono = 1,
	Right = 2,
	Left = 4,
	Linked = 8,
	RomMono = 0x8001,
	RomRight = 0x8002,
	RomLeft = 0x8004,
	RomLinked = 0x8008,
}

impl SampleType {
	pub fn from_raw(raw: u16) -> Option<Self> {
		use SampleType::*;
		Some(match raw {
			1 => Mono,
			2 => Right,
			4 => Left,
			8 => Linked,
			0x8001 => RomMono,
			0x8002 => RomRight,
			0x8004 => RomLeft,
			0x8008 => RomLinked,
			_ => return None,
		})
	}

	pub fn raw(self) -> u16 {
		self as u16
	}

	/// sample data lives in a ROM, not in the smpl chunk
	pub fn is_rom(self) -> bool {
		self.raw() & 0x8000 != 0
	}
}

/// All offsets are in sample points from the start of the smpl chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleHeader {
	pub name: String,
	pub start: u32,
	pub end: u32,
	pub loop_start: u32,
	pub loop_end: u32,
	pub sample_rate: u32,
	/// MIDI key number. 255 means unpitched.
	pub original_pitch: u8,
	/// in cents
	pub pitch_correction: i8,
	pub sample_link: u16,
	pub sample_type: SampleType,
}

fn read_u8(r: &mut Cursor<&[u8]>) -> std::io::Result<u8> {
	let mut bytes = [0; 1];
	r.read_exact(&mut bytes)?;
	Ok(bytes[0])
}

fn read_u16(r: &mut Cursor<&[u8]>) -> std::io::Result<u16> {
	let mut bytes = [0; 2];
	r.read_exact(&mut bytes)?;
	Ok(u16::from_le_bytes(bytes))
}

fn read_u32(r: &mut Cursor<&[u8]>) -> std::io::Result<u32> {
	let mut bytes = [0; 4];
	r.read_exact(&mut bytes)?;
	Ok(u32::from_le_bytes(bytes))
}

fn read_i8(r: &mut Cursor<&[u8]>) -> std::io::Result<i8> {
	Ok(read_u8(r)? as i8)
}

fn read_i16(r: &mut Cursor<&[u8]>) -> std::io::Result<i16> {
	Ok(read_u16(r)? as i16)
}

/// fixed-length, null-padded name. trailing nulls are dropped.
fn read_utf8_fixed_len(r: &mut Cursor<&[u8]>, len: usize) -> std::io::Result<String> {
	let mut name_vec = vec![0; len];
	r.read_exact(&mut name_vec)?;
	while !name_vec.is_empty() && name_vec[name_vec.len() - 1] == 0 {
		name_vec.pop();
	}
	Ok(String::from_utf8_lossy(&name_vec).to_string())
}

fn write_fixed_len(out: &mut Vec<u8>, s: &str, len: usize) {
	let bytes = s.as_bytes();
	let n = bytes.len().min(len);
	out.extend_from_slice(&bytes[..n]);
	out.resize(out.len() + len - n, 0);
}

const NAME_LEN: usize = 20;

impl Record for PresetHeader {
	const SIZE: usize = 38;

	fn read(r: &mut Cursor<&[u8]>) -> Result<Self> {
		Ok(PresetHeader {
			name: read_utf8_fixed_len(r, NAME_LEN)?,
			preset: read_u16(r)?,
			bank: read_u16(r)?,
			zone_start: read_u16(r)?,
			library: read_u32(r)?,
			genre: read_u32(r)?,
			morphology: read_u32(r)?,
		})
	}

	fn write(&self, out: &mut Vec<u8>) {
		write_fixed_len(out, &self.name, NAME_LEN);
		out.extend_from_slice(&self.preset.to_le_bytes());
		out.extend_from_slice(&self.bank.to_le_bytes());
		out.extend_from_slice(&self.zone_start.to_le_bytes());
		out.extend_from_slice(&self.library.to_le_bytes());
		out.extend_from_slice(&self.genre.to_le_bytes());
		out.extend_from_slice(&self.morphology.to_le_bytes());
	}
}

impl Record for Zone {
	const SIZE: usize = 4;

	fn read(r: &mut Cursor<&[u8]>) -> Result<Self> {
		Ok(Zone {
			gen_start: read_u16(r)?,
			mod_start: read_u16(r)?,
		})
	}

	fn write(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.gen_start.to_le_bytes());
		out.extend_from_slice(&self.mod_start.to_le_bytes());
	}
}

impl Record for Modulator {
	const SIZE: usize = 10;

	fn read(r: &mut Cursor<&[u8]>) -> Result<Self> {
		Ok(Modulator {
			src_oper: read_u16(r)?,
			dest_oper: read_u16(r)?,
			amount: read_i16(r)?,
			amount_src_oper: read_u16(r)?,
			trans_oper: read_u16(r)?,
		})
	}

	fn write(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.src_oper.to_le_bytes());
		out.extend_from_slice(&self.dest_oper.to_le_bytes());
		out.extend_from_slice(&self.amount.to_le_bytes());
		out.extend_from_slice(&self.amount_src_oper.to_le_bytes());
		out.extend_from_slice(&self.trans_oper.to_le_bytes());
	}
}

impl Record for Generator {
	const SIZE: usize = 4;

	fn read(r: &mut Cursor<&[u8]>) -> Result<Self> {
		let code = read_u16(r)?;
		let amount = read_u16(r)?;
		let operator = GeneratorOperator::from_code(code).ok_or(Error::UnknownGenerator(code))?;
		Ok(Generator { operator, amount })
	}

	fn write(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.operator.code().to_le_bytes());
		out.extend_from_slice(&self.amount.to_le_bytes());
	}
}

impl Record for InstrumentHeader {
	const SIZE: usize = 22;

	fn read(r: &mut Cursor<&[u8]>) -> Result<Self> {
		Ok(InstrumentHeader {
			name: read_utf8_fixed_len(r, NAME_LEN)?,
			zone_start: read_u16(r)?,
		})
	}

	fn write(&self, out: &mut Vec<u8>) {
		write_fixed_len(out, &self.name, NAME_LEN);
		out.extend_from_slice(&self.zone_start.to_le_bytes());
	}
}

impl Record for SampleHeader {
	const SIZE: usize = 46;

	fn read(r: &mut Cursor<&[u8]>) -> Result<Self> {
		let name = read_utf8_fixed_len(r, NAME_LEN)?;
		let start = read_u32(r)?;
		let end = read_u32(r)?;
		let loop_start = read_u32(r)?;
		let loop_end = read_u32(r)?;
		let sample_rate = read_u32(r)?;
		let original_pitch = read_u8(r)?;
		let pitch_correction = read_i8(r)?;
		let sample_link = read_u16(r)?;
		let raw_type = read_u16(r)?;
		let sample_type = SampleType::from_raw(raw_type).ok_or(Error::UnknownSampleType(raw_type))?;
		Ok(SampleHeader {
			name,
			start,
			end,
			loop_start,
			loop_end,
			sample_rate,
			original_pitch,
			pitch_correction,
			sample_link,
			sample_type,
		})
	}

	fn write(&self, out: &mut Vec<u8>) {
		write_fixed_len(out, &self.name, NAME_LEN);
		out.extend_from_slice(&self.start.to_le_bytes());
		out.extend_from_slice(&self.end.to_le_bytes());
		out.extend_from_slice(&self.loop_start.to_le_bytes());
		out.extend_from_slice(&self.loop_end.to_le_bytes());
		out.extend_from_slice(&self.sample_rate.to_le_bytes());
		out.push(self.original_pitch);
		out.push(self.pitch_correction as u8);
		out.extend_from_slice(&self.sample_link.to_le_bytes());
		out.extend_from_slice(&self.sample_type.raw().to_le_bytes());
	}
}

/// Decode every record of `chunk` except the terminal one.
pub fn decode_array<R: Record>(chunk: Chunk<'_>) -> Result<Vec<R>> {
	let len = chunk.data.len();
	if len == 0 || len % R::SIZE != 0 {
		return Err(Error::MalformedArray {
			tag: chunk.id,
			len,
			width: R::SIZE,
		});
	}
	let count = len / R::SIZE - 1;
	let mut cursor = Cursor::new(chunk.data);
	let mut records = Vec::with_capacity(count);
	for _ in 0..count {
		records.push(R::read(&mut cursor)?);
	}
	tracing::debug!("{}: {} records", chunk.id, count);
	Ok(records)
}

/// The nine decoded record arrays, terminal records removed.
#[derive(Clone, Debug, Default)]
pub struct Hydra {
	pub presets: Vec<PresetHeader>,
	pub preset_zones: Vec<Zone>,
	pub preset_modulators: Vec<Modulator>,
	pub preset_generators: Vec<Generator>,
	pub instruments: Vec<InstrumentHeader>,
	pub instrument_zones: Vec<Zone>,
	pub instrument_modulators: Vec<Modulator>,
	pub instrument_generators: Vec<Generator>,
	pub samples: Vec<SampleHeader>,
}

impl Hydra {
	pub fn decode(chunks: &HydraChunks<'_>) -> Result<Self> {
		Ok(Hydra {
			presets: decode_array(chunks.phdr)?,
			preset_zones: decode_array(chunks.pbag)?,
			preset_modulators: decode_array(chunks.pmod)?,
			preset_generators: decode_array(chunks.pgen)?,
			instruments: decode_array(chunks.inst)?,
			instrument_zones: decode_array(chunks.ibag)?,
			instrument_modulators: decode_array(chunks.imod)?,
			instrument_generators: decode_array(chunks.igen)?,
			samples: decode_array(chunks.shdr)?,
		})
	}
}
