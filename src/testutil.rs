//! Builds .sf2 files in memory for tests.
use crate::records::{Hydra, Record};

/// `tag` <size> `data`
pub fn chunk(tag: &str, data: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(8 + data.len());
	out.extend_from_slice(tag.as_bytes());
	out.extend_from_slice(&(data.len() as u32).to_le_bytes());
	out.extend_from_slice(data);
	out
}

/// LIST <size> `form` `chunks...`
pub fn list(form: &str, chunks: &[Vec<u8>]) -> Vec<u8> {
	let mut body = form.as_bytes().to_vec();
	for c in chunks {
		body.extend_from_slice(c);
	}
	chunk("LIST", &body)
}

/// the records followed by an all-zero terminal record
pub fn encode_array<R: Record>(records: &[R]) -> Vec<u8> {
	let mut out = Vec::with_capacity((records.len() + 1) * R::SIZE);
	for r in records {
		r.write(&mut out);
	}
	out.resize(out.len() + R::SIZE, 0);
	out
}

pub struct Sf2Builder {
	pub info: Vec<Vec<u8>>,
	pub hydra: Hydra,
	/// `None` leaves the sdta list empty, like a ROM-only bank
	pub sample_points: Option<Vec<i16>>,
}

impl Sf2Builder {
	/// a bank with the mandatory INFO sub-chunks and no presets
	pub fn new() -> Self {
		Sf2Builder {
			info: vec![
				chunk("ifil", &[2, 0, 4, 0]),
				chunk("isng", b"EMU8000\0"),
				chunk("INAM", b"Test Bank\0\0\0"),
			],
			hydra: Hydra::default(),
			sample_points: Some(vec![0; 46]),
		}
	}

	pub fn hydra(mut self, hydra: Hydra) -> Self {
		self.hydra = hydra;
		self
	}

	pub fn info(mut self, sub_chunk: Vec<u8>) -> Self {
		self.info.push(sub_chunk);
		self
	}

	pub fn pdta(&self) -> Vec<u8> {
		let h = &self.hydra;
		list(
			"pdta",
			&[
				chunk("phdr", &encode_array(&h.presets)),
				chunk("pbag", &encode_array(&h.preset_zones)),
				chunk("pmod", &encode_array(&h.preset_modulators)),
				chunk("pgen", &encode_array(&h.preset_generators)),
				chunk("inst", &encode_array(&h.instruments)),
				chunk("ibag", &encode_array(&h.instrument_zones)),
				chunk("imod", &encode_array(&h.instrument_modulators)),
				chunk("igen", &encode_array(&h.instrument_generators)),
				chunk("shdr", &encode_array(&h.samples)),
			],
		)
	}

	pub fn build(&self) -> Vec<u8> {
		self.build_with_pdta(self.pdta())
	}

	/// like `build`, but with a hand-made pdta list
	pub fn build_with_pdta(&self, pdta: Vec<u8>) -> Vec<u8> {
		let sdta: Vec<Vec<u8>> = match &self.sample_points {
			Some(points) => {
				let smpl: Vec<u8> = points.iter().flat_map(|s| s.to_le_bytes()).collect();
				vec![chunk("smpl", &smpl)]
			}
			None => vec![],
		};
		let mut body = b"sfbk".to_vec();
		body.extend_from_slice(&list("INFO", &self.info));
		body.extend_from_slice(&list("sdta", &sdta));
		body.extend_from_slice(&pdta);
		chunk("RIFF", &body)
	}
}
