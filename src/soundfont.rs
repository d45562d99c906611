/*
IMPORTANT SOUNDFONT TERMINOLOGY:
 a PRESET is a source you can play from, e.g. "Piano", "Harpsichord", "Choir"
 presets are numbered, and grouped into numbered BANKS
 an INSTRUMENT is an internal group of samples which presets refer to
 (the idea here is that you could, e.g., have presets "Piano 1" and "Piano 2" which use the
  same underlying "Piano" instrument, but different settings like pitch correction, etc.)
 a ZONE (or "bag") is a group of generators and modulators.
 both presets and instruments have zones.
	 a preset zone refers to an instrument
	 an instrument zone refers to a sample
 a GENERATOR is one (operator, amount) setting of a zone
 a SAMPLE is a block of audio data with some properties of how it should be played

sample audio is never decoded here; only its location is kept.
*/
use crate::error::Result;
use crate::info::{self, InfoEntry};
use crate::records::{Hydra, SampleHeader};
use crate::resolve::{self, BankModel, Banks};
use crate::riff::{self, FourCC};
use std::ops::Range;
use std::path::Path;

/// A fully decoded .sf2 file.
///
/// basic usage:
/// ```no_run
/// let sf = sfcontents::SoundFont::open("soundfont.sf2").expect("oh no");
/// println!("{}", sf.name());
/// for (bank, presets) in sf.banks() {
///     for p in presets {
///         println!("{:3} {:3} {} -> {:?}", bank, p.preset, p.name, p.instruments);
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct SoundFont {
	/// INFO entries, in catalog order
	pub info: Vec<InfoEntry>,
	/// the nine record arrays, exactly as stored
	pub hydra: Hydra,
	pub model: BankModel,
	/// where the sdta list body sits in the file
	pub sample_data: Range<usize>,
	/// where the smpl chunk body sits in the file (absent for ROM-only banks)
	pub smpl: Option<Range<usize>>,
}

impl SoundFont {
	/// Read and decode a sound font file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let data = std::fs::read(path)?;
		tracing::debug!("read {} bytes from {}", data.len(), path.display());
		Self::from_bytes(&data)
	}

	/// Like `open()` but takes the file contents.
	pub fn from_bytes(data: &[u8]) -> Result<Self> {
		let container = riff::read_container(data)?;
		let info = info::decode_info(container.info)?;
		let hydra = Hydra::decode(&container.hydra)?;
		let model = resolve::resolve(&hydra)?;
		Ok(SoundFont {
			info,
			hydra,
			model,
			sample_data: container.sdta.range(),
			smpl: container.smpl.map(|c| c.range()),
		})
	}

	/// value of an INFO sub-chunk
	pub fn info_value(&self, tag: FourCC) -> Option<&str> {
		self.info
			.iter()
			.find(|e| e.tag == tag)
			.map(|e| e.value.as_str())
	}

	/// the bank name (INAM is mandatory, so this is always there)
	pub fn name(&self) -> &str {
		self.info_value(info::BANK_NAME).unwrap_or("")
	}

	pub fn banks(&self) -> &Banks {
		&self.model.banks
	}

	/// Byte range of a sample's 16-bit data in the file.
	/// `None` for ROM samples, or if the header points outside the smpl chunk.
	pub fn sample_bytes(&self, sample: &SampleHeader) -> Option<Range<usize>> {
		if sample.sample_type.is_rom() || sample.end < sample.start {
			return None;
		}
		let smpl = self.smpl.as_ref()?;
		let start = smpl.start + 2 * sample.start as usize;
		let end = smpl.start + 2 * sample.end as usize;
		if end > smpl.end {
			return None;
		}
		Some(start..end)
	}
}
