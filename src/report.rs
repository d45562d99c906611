//! Markdown summary of a decoded bank.
use crate::info::COMMENTS;
use crate::resolve::BankEntry;
use crate::soundfont::SoundFont;
use std::io::Write;

// names come straight from the file; a '|' or a line break would break the table
fn cell(s: &str) -> String {
	s.replace('|', "\\|").replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// `s` as an inline code span, fenced with one more backtick than the longest
/// run inside it. Line breaks become spaces so the list item stays on one line.
fn code(s: &str) -> String {
	let s = s.replace("\r\n", " ").replace(['\n', '\r'], " ");
	let mut longest = 0;
	let mut run = 0;
	for c in s.chars() {
		if c == '`' {
			run += 1;
			longest = longest.max(run);
		} else {
			run = 0;
		}
	}
	let fence = "`".repeat(longest + 1);
	if longest == 0 {
		format!("{fence}{s}{fence}")
	} else {
		format!("{fence} {s} {fence}")
	}
}

/// Write the report. `title` is normally the input file name.
pub fn write_markdown(out: &mut impl Write, title: &str, sf: &SoundFont) -> std::io::Result<()> {
	writeln!(out, "# File {}\n", title)?;

	let mut comment = None;
	for entry in sf.info.iter() {
		if entry.tag == COMMENTS {
			comment = Some(&entry.value);
		} else {
			writeln!(out, "- {}: {}", entry.label, code(&entry.value))?;
		}
	}
	if let Some(comment) = comment {
		let comment = comment.replace('\0', "");
		writeln!(out, "### Comments\n")?;
		writeln!(out, "{}", comment.trim_end_matches('\n'))?;
	}

	writeln!(out, "\n## Presets\n")?;
	writeln!(out, "- Banks: `{}`", sf.model.banks.len())?;
	writeln!(out, "- Presets: `{}`", sf.hydra.presets.len())?;
	writeln!(out, "- Instruments: `{}`", sf.hydra.instruments.len())?;
	writeln!(out, "- Samples: `{}`\n", sf.hydra.samples.len())?;

	writeln!(out, "| Bank | Preset | Preset Name        | Instruments |")?;
	writeln!(out, "|:----:|:------:|--------------------|-------------|")?;
	for (bank, entries) in sf.model.banks.iter() {
		let mut entries: Vec<&BankEntry> = entries.iter().collect();
		entries.sort_by_key(|e| e.preset);
		let mut bank_no = bank.to_string();
		for entry in entries {
			writeln!(
				out,
				"|{}|{}|{}|{}|",
				bank_no,
				entry.preset,
				cell(&entry.name),
				cell(&entry.instruments.join(", "))
			)?;
			// only the first row of a bank shows its number
			bank_no = " ".to_string();
		}
	}

	writeln!(out, "\n## Instruments\n")?;
	writeln!(out, "| Instrument | Instrument Name    |")?;
	writeln!(out, "|:----------:|--------------------|")?;
	for inst in sf.model.instruments.iter() {
		writeln!(out, "|{}|{}|", inst.index, cell(&inst.name))?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::generator::{Generator, GeneratorOperator};
	use crate::records::{Hydra, InstrumentHeader, PresetHeader, Zone};
	use crate::testutil::{chunk, Sf2Builder};

	fn preset(name: &str, preset: u16, bank: u16, zone_start: u16) -> PresetHeader {
		PresetHeader {
			name: name.to_string(),
			preset,
			bank,
			zone_start,
			library: 0,
			genre: 0,
			morphology: 0,
		}
	}

	fn render(builder: Sf2Builder) -> String {
		let sf = SoundFont::from_bytes(&builder.build()).unwrap();
		let mut out = vec![];
		write_markdown(&mut out, "test.sf2", &sf).unwrap();
		String::from_utf8(out).unwrap()
	}

	fn bank() -> Sf2Builder {
		let inst = |amount| Generator {
			operator: GeneratorOperator::Instrument,
			amount,
		};
		let zone = |gen_start| Zone {
			gen_start,
			mod_start: 0,
		};
		Sf2Builder::new().hydra(Hydra {
			presets: vec![
				preset("Harpsichord", 6, 0, 2),
				preset("Piano", 0, 0, 0),
				preset("Drums", 0, 128, 3),
			],
			preset_zones: vec![zone(0), zone(1), zone(2), zone(3)],
			preset_generators: vec![inst(0), inst(1), inst(1), inst(2)],
			instruments: vec![
				InstrumentHeader {
					name: "Piano L".to_string(),
					zone_start: 0,
				},
				InstrumentHeader {
					name: "Piano R".to_string(),
					zone_start: 1,
				},
				InstrumentHeader {
					name: "Kit".to_string(),
					zone_start: 2,
				},
			],
			instrument_zones: vec![zone(0), zone(1), zone(2)],
			instrument_generators: vec![
				Generator {
					operator: GeneratorOperator::Pan,
					amount: 0,
				};
				3
			],
			..Default::default()
		})
	}

	#[test]
	fn header_and_info() {
		let text = render(bank());
		assert!(text.starts_with("# File test.sf2\n\n- Version: `2.4`\n"));
		assert!(text.contains("- Target Sound Engine: `EMU8000`\n"));
		assert!(text.contains("- Sound Font Bank Name: `Test Bank`\n"));
		assert!(text.contains("- Banks: `2`\n- Presets: `3`\n- Instruments: `3`\n- Samples: `0`\n"));
	}

	#[test]
	fn preset_table() {
		let text = render(bank());
		let rows: Vec<&str> = text.lines().filter(|l| l.starts_with("|")).collect();
		assert_eq!(
			rows[2..5],
			[
				"|0|0|Piano|Piano L, Piano R|",
				"| |6|Harpsichord|Piano R|",
				"|128|0|Drums|Kit|",
			]
		);
	}

	#[test]
	fn instrument_table() {
		let text = render(bank());
		let tail = text.split("## Instruments").nth(1).unwrap();
		assert!(tail.contains("|0|Piano L|\n|1|Piano R|\n|2|Kit|\n"));
	}

	#[test]
	fn table_cells_stay_on_one_row() {
		assert_eq!(cell("Bass|Lead"), "Bass\\|Lead");
		assert_eq!(cell("two\nlines\r\nhere"), "two lines here");
	}

	#[test]
	fn backticks_in_info_values() {
		assert_eq!(code("plain"), "`plain`");
		assert_eq!(code("a `b` c"), "`` a `b` c ``");
		assert_eq!(code("x``y"), "``` x``y ```");

		let text = render(bank().info(chunk("ICOP", b"(c) `me`\nand you\0")));
		assert!(text.contains("- Copyright: `` (c) `me` and you ``\n"));
	}

	#[test]
	fn comments_come_last() {
		let text = render(
			bank()
				.info(chunk("ICMT", b"line one\nline two\n\n\0\0"))
				.info(chunk("ISFT", b"Awave\0")),
		);
		let sft = text.find("- SoundFont tools").unwrap();
		let comments = text.find("### Comments\n\nline one\nline two\n\n## Presets").unwrap();
		assert!(sft < comments);
	}
}
