//! INFO list: bank name, version, tool attribution, comments, ...
use crate::error::{Error, Result};
use crate::riff::{fourcc, Chunk, ChunkReader, FourCC};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoEntry {
	pub tag: FourCC,
	pub label: &'static str,
	pub value: String,
}

enum Kind {
	Version,
	Text,
}

struct Known {
	tag: FourCC,
	label: &'static str,
	mandatory: bool,
	kind: Kind,
}

const fn known(tag: &str, label: &'static str, mandatory: bool, kind: Kind) -> Known {
	Known {
		tag: fourcc(tag),
		label,
		mandatory,
		kind,
	}
}

/// Output order follows this table, not the order in the file.
const CATALOG: [Known; 11] = [
	known("ifil", "Version", true, Kind::Version),
	known("isng", "Target Sound Engine", true, Kind::Text),
	known("INAM", "Sound Font Bank Name", true, Kind::Text),
	known("irom", "ROM", false, Kind::Text),
	known("iver", "ROM Revision", false, Kind::Version),
	known("ICRD", "Date of Creation of the Bank", false, Kind::Text),
	known("IENG", "Sound Designers and Engineers for the Bank", false, Kind::Text),
	known("IPRD", "Product for which the Bank was intended", false, Kind::Text),
	known("ICOP", "Copyright", false, Kind::Text),
	known("ICMT", "Comments", false, Kind::Text),
	known("ISFT", "SoundFont tools used to create and alter the bank", false, Kind::Text),
];

pub const COMMENTS: FourCC = fourcc("ICMT");
pub const BANK_NAME: FourCC = fourcc("INAM");

fn decode_version(tag: FourCC, data: &[u8]) -> Result<String> {
	if data.len() < 4 {
		return Err(Error::MalformedInfo {
			tag,
			len: data.len(),
		});
	}
	let major = u16::from_le_bytes([data[0], data[1]]);
	let minor = u16::from_le_bytes([data[2], data[3]]);
	Ok(format!("{}.{}", major, minor))
}

fn decode_text(data: &[u8]) -> String {
	let mut end = data.len();
	while end > 0 && data[end - 1] == 0 {
		end -= 1;
	}
	String::from_utf8_lossy(&data[..end]).to_string()
}

/// Decode the body of the INFO list.
pub fn decode_info(info: Chunk<'_>) -> Result<Vec<InfoEntry>> {
	let mut found: Vec<Chunk> = vec![];
	for chunk in ChunkReader::new(info) {
		let chunk = chunk?;
		if !CATALOG.iter().any(|k| k.tag == chunk.id) {
			tracing::debug!("ignoring unknown INFO sub-chunk '{}'", chunk.id);
		} else if found.iter().any(|c| c.id == chunk.id) {
			tracing::debug!("ignoring repeated INFO sub-chunk '{}'", chunk.id);
		} else {
			found.push(chunk);
		}
	}

	let mut entries = Vec::with_capacity(found.len());
	for known in CATALOG.iter() {
		let chunk = match found.iter().find(|c| c.id == known.tag) {
			Some(c) => c,
			None if known.mandatory => {
				return Err(Error::MissingMetadata {
					tag: known.tag,
					label: known.label,
				})
			}
			// optional
			None => continue,
		};
		let value = match known.kind {
			Kind::Version => decode_version(known.tag, chunk.data)?,
			Kind::Text => decode_text(chunk.data),
		};
		entries.push(InfoEntry {
			tag: known.tag,
			label: known.label,
			value,
		});
	}
	Ok(entries)
}
