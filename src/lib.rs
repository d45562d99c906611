//! Structural decoder for SoundFont 2 (.sf2) banks.
//!
//! The file is read in one pass: the RIFF framing is checked ([`riff`]), the
//! INFO list and the nine pdta record arrays are decoded ([`info`],
//! [`records`]), and the preset/instrument tree that those flat arrays only
//! imply through start indices is rebuilt ([`resolve`]). [`SoundFont`] runs
//! all of it; [`report`] renders the result as Markdown.
//!
//! Nothing is ever written back to a sound font.

mod error;
pub mod generator;
pub mod info;
pub mod records;
pub mod report;
pub mod resolve;
pub mod riff;
mod soundfont;

#[cfg(test)]
mod testutil;

pub use error::{Error, FramingError, Result};
pub use soundfont::SoundFont;
