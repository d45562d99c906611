use anyhow::{bail, Context, Result};
use clap::Parser;
use sfcontents::{report, SoundFont};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Dump the presets, instruments and samples of a SoundFont 2 bank as Markdown
#[derive(Parser, Debug)]
#[command(name = "sfcontents")]
#[command(version)]
struct Cli {
	/// .sf2 file to read
	file: PathBuf,

	/// Where to write the report (default: FILE with a .md extension)
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Print the report instead of writing a file
	#[arg(long, conflicts_with = "output")]
	stdout: bool,
}

fn default_output(input: &Path) -> PathBuf {
	input.with_extension("md")
}

fn run(cli: Cli) -> Result<()> {
	tracing::info!("Reading file: {}...", cli.file.display());
	if !cli.file.is_file() {
		bail!("File not found: {}", cli.file.display());
	}

	let sf = SoundFont::open(&cli.file)
		.with_context(|| format!("couldn't read {}", cli.file.display()))?;

	let title = match cli.file.file_name() {
		Some(name) => name.to_string_lossy().into_owned(),
		None => cli.file.display().to_string(),
	};

	if cli.stdout {
		let stdout = std::io::stdout();
		let mut out = stdout.lock();
		report::write_markdown(&mut out, &title, &sf)?;
		out.flush()?;
	} else {
		let path = cli.output.unwrap_or_else(|| default_output(&cli.file));
		tracing::info!("Writing file: {}...", path.display());
		let file = File::create(&path)
			.with_context(|| format!("couldn't create {}", path.display()))?;
		let mut out = BufWriter::new(file);
		report::write_markdown(&mut out, &title, &sf)
			.with_context(|| format!("couldn't write {}", path.display()))?;
		out.flush()?;
	}

	tracing::info!("Done.");
	Ok(())
}

fn main() -> Result<()> {
	// logs go to stderr so --stdout output stays clean
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.init();

	run(Cli::parse())
}
