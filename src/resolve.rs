//! Rebuilds the preset → zone → generator tree from the flat hydra arrays.
//!
//! Nothing in the file says how many zones a preset has, or how many generators
//! a zone has. Each header only stores where its children *start*; they end
//! where the next sibling's children start (the smallest start index that is
//! strictly greater), or at the end of the array.
use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::records::{Hydra, PresetHeader, Zone};
use crate::riff::{FourCC, IBAG, INST, PBAG, PHDR};
use std::collections::BTreeMap;
use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankEntry {
	pub preset: u16,
	pub name: String,
	pub zone_start: u16,
	pub zones: usize,
	/// names of every instrument used by this preset, in order of first use
	pub instruments: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstrumentEntry {
	/// position in the inst array
	pub index: usize,
	pub name: String,
	pub zone_start: u16,
	pub zones: usize,
	/// names of every sample used by this instrument, in order of first use
	pub samples: Vec<String>,
}

/// bank number → presets of that bank, in file order
pub type Banks = BTreeMap<u16, Vec<BankEntry>>;

#[derive(Clone, Debug, Default)]
pub struct BankModel {
	pub banks: Banks,
	pub instruments: Vec<InstrumentEntry>,
}

impl BankModel {
	pub fn preset_count(&self) -> usize {
		self.banks.values().map(Vec::len).sum()
	}
}

/// Sorted start indices of one group of siblings.
struct StartIndices {
	starts: Vec<u16>,
}

impl StartIndices {
	/// `tag` names the array the starts were read from, for error messages.
	fn new(tag: FourCC, starts: impl Iterator<Item = u16>) -> Result<Self> {
		let mut starts: Vec<u16> = starts.collect();
		starts.sort_unstable();
		// with two equal starts there's no telling which sibling owns the range
		if let Some(w) = starts.windows(2).find(|w| w[0] == w[1]) {
			return Err(Error::DuplicateStartIndex { tag, index: w[0] });
		}
		Ok(StartIndices { starts })
	}

	/// indices of the children belonging to the sibling starting at `start`,
	/// in an array of `len` children.
	fn range(&self, start: u16, len: usize, what: &'static str) -> Result<Range<usize>> {
		let next = self.starts.partition_point(|&s| s <= start);
		let end = match self.starts.get(next) {
			Some(&s) => s as usize,
			None => len,
		};
		let start = start as usize;
		if start > len {
			return Err(Error::IndexOutOfRange {
				what,
				index: start,
				len,
			});
		}
		if end > len {
			return Err(Error::IndexOutOfRange {
				what,
				index: end,
				len,
			});
		}
		Ok(start..end)
	}
}

fn push_unique(names: &mut Vec<String>, name: &str) {
	if !names.iter().any(|n| n == name) {
		names.push(name.to_string());
	}
}

/// One level of the tree: a zone array and the generators its zones point at.
struct ZoneLevel<'a> {
	zones: &'a [Zone],
	generators: &'a [Generator],
	gen_starts: StartIndices,
	what: &'static str,
}

impl<'a> ZoneLevel<'a> {
	fn new(
		tag: FourCC,
		zones: &'a [Zone],
		generators: &'a [Generator],
		what: &'static str,
	) -> Result<Self> {
		Ok(ZoneLevel {
			zones,
			generators,
			gen_starts: StartIndices::new(tag, zones.iter().map(|z| z.gen_start))?,
			what,
		})
	}

	/// walk every generator of the given zones, collecting the names `lookup` finds.
	fn referenced_names(
		&self,
		zones: Range<usize>,
		lookup: impl Fn(&Generator) -> Result<Option<&'a str>>,
	) -> Result<Vec<String>> {
		let mut names = vec![];
		for zone in &self.zones[zones] {
			let gens = self
				.gen_starts
				.range(zone.gen_start, self.generators.len(), self.what)?;
			for gen in &self.generators[gens] {
				if let Some(name) = lookup(gen)? {
					push_unique(&mut names, name);
				}
			}
		}
		Ok(names)
	}
}

fn resolve_presets(hydra: &Hydra) -> Result<Banks> {
	let preset_starts = StartIndices::new(PHDR, hydra.presets.iter().map(|p| p.zone_start))?;
	let level = ZoneLevel::new(
		PBAG,
		&hydra.preset_zones,
		&hydra.preset_generators,
		"preset generator",
	)?;
	let instrument_name = |gen: &Generator| -> Result<Option<&str>> {
		match gen.instrument() {
			None => Ok(None),
			Some(i) => match hydra.instruments.get(i) {
				Some(inst) => Ok(Some(inst.name.as_str())),
				None => Err(Error::IndexOutOfRange {
					what: "instrument",
					index: i,
					len: hydra.instruments.len(),
				}),
			},
		}
	};

	// group by bank, keeping file order within a bank
	let mut presets: Vec<&PresetHeader> = hydra.presets.iter().collect();
	presets.sort_by_key(|p| p.bank);

	let mut banks = Banks::new();
	for preset in presets {
		let zones = preset_starts.range(preset.zone_start, level.zones.len(), "preset zone")?;
		let entry = BankEntry {
			preset: preset.preset,
			name: preset.name.clone(),
			zone_start: preset.zone_start,
			zones: zones.len(),
			instruments: level.referenced_names(zones, &instrument_name)?,
		};
		tracing::debug!(
			"bank {} preset {} '{}': {} zones, instruments {:?}",
			preset.bank,
			entry.preset,
			entry.name,
			entry.zones,
			entry.instruments
		);
		banks.entry(preset.bank).or_default().push(entry);
	}
	Ok(banks)
}

fn resolve_instruments(hydra: &Hydra) -> Result<Vec<InstrumentEntry>> {
	let instrument_starts =
		StartIndices::new(INST, hydra.instruments.iter().map(|i| i.zone_start))?;
	let level = ZoneLevel::new(
		IBAG,
		&hydra.instrument_zones,
		&hydra.instrument_generators,
		"instrument generator",
	)?;
	let sample_name = |gen: &Generator| -> Result<Option<&str>> {
		match gen.sample() {
			None => Ok(None),
			Some(i) => match hydra.samples.get(i) {
				Some(sample) => Ok(Some(sample.name.as_str())),
				None => Err(Error::IndexOutOfRange {
					what: "sample",
					index: i,
					len: hydra.samples.len(),
				}),
			},
		}
	};

	let mut instruments = Vec::with_capacity(hydra.instruments.len());
	for (index, inst) in hydra.instruments.iter().enumerate() {
		let zones =
			instrument_starts.range(inst.zone_start, level.zones.len(), "instrument zone")?;
		instruments.push(InstrumentEntry {
			index,
			name: inst.name.clone(),
			zone_start: inst.zone_start,
			zones: zones.len(),
			samples: level.referenced_names(zones, &sample_name)?,
		});
	}
	Ok(instruments)
}

/// Build the bank model. `hydra` is only read.
pub fn resolve(hydra: &Hydra) -> Result<BankModel> {
	let banks = resolve_presets(hydra)?;
	let instruments = resolve_instruments(hydra)?;
	tracing::info!(
		"{} banks, {} presets, {} instruments, {} samples",
		banks.len(),
		hydra.presets.len(),
		instruments.len(),
		hydra.samples.len()
	);
	Ok(BankModel { banks, instruments })
}
