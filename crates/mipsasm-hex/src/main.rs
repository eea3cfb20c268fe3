use anyhow::{Context, Result};
use clap::Parser;

use std::path::{Path, PathBuf};

use mipsasm_rs::emit::hex_lines;

/// Hex-projects pre-existing binary text: no assembly semantics, just the
/// line filter and base conversion.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert whitespace-delimited binary text lines to 8-digit hex words"
)]
struct Opts {
    /// Input binary text file
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let content = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;

    let dir = opts.input.parent().unwrap_or(Path::new("."));
    let stem = opts
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    let path = dir.join(format!("{stem}.hex"));

    let hex = hex_lines(content.lines());
    std::fs::write(&path, hex.join("\n"))
        .with_context(|| format!("writing {}", path.display()))?;
    println!("File created at '{}'", path.display());

    Ok(())
}
