//! Generator operators (SoundFont 2.04 § 8.1.2).
//!
//! Every operator code from 0 to 60 has a name, including the ones the standard
//! reserves. Most amounts are plain numbers; two operators pack a byte range and
//! two point into the instrument or sample array.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum GeneratorOperator {
	StartAddrsOffset = 0,
	EndAddrsOffset = 1,
	StartloopAddrsOffset = 2,
	EndloopAddrsOffset = 3,
	StartAddrsCoarseOffset = 4,
	ModLfoToPitch = 5,
	VibLfoToPitch = 6,
	ModEnvToPitch = 7,
	InitialFilterFc = 8,
	InitialFilterQ = 9,
	ModLfoToFilterFc = 10,
	ModEnvToFilterFc = 11,
	EndAddrsCoarseOffset = 12,
	ModLfoToVolume = 13,
	Unused1 = 14,
	ChorusEffectsSend = 15,
	ReverbEffectsSend = 16,
	Pan = 17,
	Unused2 = 18,
	Unused3 = 19,
	Unused4 = 20,
	DelayModLfo = 21,
	FreqModLfo = 22,
	DelayVibLfo = 23,
	FreqVibLfo = 24,
	DelayModEnv = 25,
	AttackModEnv = 26,
	HoldModEnv = 27,
	DecayModEnv = 28,
	SustainModEnv = 29,
	ReleaseModEnv = 30,
	KeynumToModEnvHold = 31,
	KeynumToModEnvDecay = 32,
	DelayVolEnv = 33,
	AttackVolEnv = 34,
	HoldVolEnv = 35,
	DecayVolEnv = 36,
	SustainVolEnv = 37,
	ReleaseVolEnv = 38,
	KeynumToVolEnvHold = 39,
	KeynumToVolEnvDecay = 40,
	Instrument = 41,
	Reserved1 = 42,
	KeyRange = 43,
	VelRange = 44,
	StartloopAddrsCoarseOffset = 45,
	Keynum = 46,
	Velocity = 47,
	InitialAttenuation = 48,
	Reserved2 = 49,
	EndloopAddrsCoarseOffset = 50,
	CoarseTune = 51,
	FineTune = 52,
	SampleId = 53,
	SampleModes = 54,
	Reserved3 = 55,
	ScaleTuning = 56,
	ExclusiveClass = 57,
	OverridingRootKey = 58,
	Unused5 = 59,
	EndOper = 60,
}

use GeneratorOperator::*;

/// indexed by operator code
const OPERATORS: [(GeneratorOperator, &str); 61] = [
	(StartAddrsOffset, "startAddrsOffset"),
	(EndAddrsOffset, "endAddrsOffset"),
	(StartloopAddrsOffset, "startloopAddrsOffset"),
	(EndloopAddrsOffset, "endloopAddrsOffset"),
	(StartAddrsCoarseOffset, "startAddrsCoarseOffset"),
	(ModLfoToPitch, "modLfoToPitch"),
	(VibLfoToPitch, "vibLfoToPitch"),
	(ModEnvToPitch, "modEnvToPitch"),
	(InitialFilterFc, "initialFilterFc"),
	(InitialFilterQ, "initialFilterQ"),
	(ModLfoToFilterFc, "modLfoToFilterFc"),
	(ModEnvToFilterFc, "modEnvToFilterFc"),
	(EndAddrsCoarseOffset, "endAddrsCoarseOffset"),
	(ModLfoToVolume, "modLfoToVolume"),
	(Unused1, "unused1"),
	(ChorusEffectsSend, "chorusEffectsSend"),
	(ReverbEffectsSend, "reverbEffectsSend"),
	(Pan, "pan"),
	(Unused2, "unused2"),
	(Unused3, "unused3"),
	(Unused4, "unused4"),
	(DelayModLfo, "delayModLFO"),
	(FreqModLfo, "freqModLFO"),
	(DelayVibLfo, "delayVibLFO"),
	(FreqVibLfo, "freqVibLFO"),
	(DelayModEnv, "delayModEnv"),
	(AttackModEnv, "attackModEnv"),
	(HoldModEnv, "holdModEnv"),
	(DecayModEnv, "decayModEnv"),
	(SustainModEnv, "sustainModEnv"),
	(ReleaseModEnv, "releaseModEnv"),
	(KeynumToModEnvHold, "keynumToModEnvHold"),
	(KeynumToModEnvDecay, "keynumToModEnvDecay"),
	(DelayVolEnv, "delayVolEnv"),
	(AttackVolEnv, "attackVolEnv"),
	(HoldVolEnv, "holdVolEnv"),
	(DecayVolEnv, "decayVolEnv"),
	(SustainVolEnv, "sustainVolEnv"),
	(ReleaseVolEnv, "releaseVolEnv"),
	(KeynumToVolEnvHold, "keynumToVolEnvHold"),
	(KeynumToVolEnvDecay, "keynumToVolEnvDecay"),
	(Instrument, "instrument"),
	(Reserved1, "reserved1"),
	(KeyRange, "keyRange"),
	(VelRange, "velRange"),
	(StartloopAddrsCoarseOffset, "startloopAddrsCoarseOffset"),
	(Keynum, "keynum"),
	(Velocity, "velocity"),
	(InitialAttenuation, "initialAttenuation"),
	(Reserved2, "reserved2"),
	(EndloopAddrsCoarseOffset, "endloopAddrsCoarseOffset"),
	(CoarseTune, "coarseTune"),
	(FineTune, "fineTune"),
	(SampleId, "sampleID"),
	(SampleModes, "sampleModes"),
	(Reserved3, "reserved3"),
	(ScaleTuning, "scaleTuning"),
	(ExclusiveClass, "exclusiveClass"),
	(OverridingRootKey, "overridingRootKey"),
	(Unused5, "unused5"),
	(EndOper, "endOper"),
];

/// How a generator's 16-bit amount should be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmountKind {
	Scalar,
	/// low byte = minimum, high byte = maximum
	Range,
	/// index into the instrument array (preset generators only)
	InstrumentIndex,
	/// index into the sample array (instrument generators only)
	SampleIndex,
}

impl GeneratorOperator {
	/// `None` for codes outside the catalog.
	pub fn from_code(code: u16) -> Option<Self> {
		OPERATORS.get(code as usize).map(|&(op, _)| op)
	}

	pub fn code(self) -> u16 {
		self as u16
	}

	pub fn name(self) -> &'static str {
		OPERATORS[self as usize].1
	}

	pub fn amount_kind(self) -> AmountKind {
		match self {
			KeyRange | VelRange => AmountKind::Range,
			Instrument => AmountKind::InstrumentIndex,
			SampleId => AmountKind::SampleIndex,
			_ => AmountKind::Scalar,
		}
	}
}

impl std::fmt::Display for GeneratorOperator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
		f.write_str(self.name())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generator {
	pub operator: GeneratorOperator,
	pub amount: u16,
}

/// A generator amount, interpreted according to its operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorValue {
	Scalar(u16),
	Range { low: u8, high: u8 },
	Instrument(u16),
	Sample(u16),
}

impl std::fmt::Display for GeneratorValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
		match self {
			GeneratorValue::Scalar(n) | GeneratorValue::Instrument(n) | GeneratorValue::Sample(n) => {
				write!(f, "{}", n)
			}
			GeneratorValue::Range { low, high } => write!(f, "{} - {}", low, high),
		}
	}
}

impl Generator {
	pub fn value(&self) -> GeneratorValue {
		match self.operator.amount_kind() {
			AmountKind::Scalar => GeneratorValue::Scalar(self.amount),
			AmountKind::Range => GeneratorValue::Range {
				low: (self.amount & 0xff) as u8,
				high: (self.amount >> 8) as u8,
			},
			AmountKind::InstrumentIndex => GeneratorValue::Instrument(self.amount),
			AmountKind::SampleIndex => GeneratorValue::Sample(self.amount),
		}
	}

	/// the instrument this generator points at, if it is an `instrument` generator
	pub fn instrument(&self) -> Option<usize> {
		match self.value() {
			GeneratorValue::Instrument(i) => Some(i as usize),
			_ => None,
		}
	}

	/// the sample this generator points at, if it is a `sampleID` generator
	pub fn sample(&self) -> Option<usize> {
		match self.value() {
			GeneratorValue::Sample(i) => Some(i as usize),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn table_is_indexed_by_code() {
		for (code, &(op, _)) in OPERATORS.iter().enumerate() {
			assert_eq!(op.code() as usize, code);
			assert_eq!(GeneratorOperator::from_code(code as u16), Some(op));
		}
	}

	#[test]
	fn reserved_codes_have_names() {
		assert_eq!(Unused1.name(), "unused1");
		assert_eq!(GeneratorOperator::from_code(42).unwrap().name(), "reserved1");
		assert_eq!(GeneratorOperator::from_code(55).unwrap().name(), "reserved3");
		assert_eq!(GeneratorOperator::from_code(59).unwrap().name(), "unused5");
		assert_eq!(GeneratorOperator::from_code(60).unwrap().name(), "endOper");
	}

	#[test]
	fn codes_past_the_catalog_are_unknown() {
		assert_eq!(GeneratorOperator::from_code(61), None);
		assert_eq!(GeneratorOperator::from_code(u16::MAX), None);
	}

	#[test]
	fn range_values_split_low_and_high_bytes() {
		for amount in [0x0000u16, 0x7f00, 0x007f, 0x3c24, 0xffff] {
			let g = Generator {
				operator: KeyRange,
				amount,
			};
			assert_eq!(
				g.value().to_string(),
				format!("{} - {}", amount & 0xff, (amount >> 8) & 0xff)
			);
		}
		let vel = Generator {
			operator: VelRange,
			amount: 0x7f01,
		};
		assert_eq!(vel.value(), GeneratorValue::Range { low: 1, high: 127 });
	}

	#[test]
	fn scalars_print_raw() {
		let pan = Generator {
			operator: Pan,
			amount: (-500i16) as u16,
		};
		assert_eq!(pan.value().to_string(), "65036");
	}

	#[test]
	fn cross_references() {
		let inst = Generator {
			operator: Instrument,
			amount: 7,
		};
		assert_eq!(inst.instrument(), Some(7));
		assert_eq!(inst.sample(), None);
		let sample = Generator {
			operator: SampleId,
			amount: 3,
		};
		assert_eq!(sample.sample(), Some(3));
		assert_eq!(sample.instrument(), None);
		assert_eq!(sample.value().to_string(), "3");
	}
}
