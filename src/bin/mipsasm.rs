use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::path::{Path, PathBuf};

use mipsasm_rs::{AsmOptions, Assembler, OutputSet};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assemble a MIPS-subset source file into binary and hex word listings"
)]
struct Opts {
    /// Emit the .bin listing only (unless --hex is also given)
    #[arg(short, long)]
    bin: bool,
    /// Emit the .hex listing only (unless --bin is also given)
    #[arg(short = 'x', long)]
    hex: bool,
    /// Prefix the binary listing with the register-allocation report
    #[arg(short, long)]
    comment: bool,
    /// Treat overflow warnings as fatal errors
    #[arg(short, long)]
    strict: bool,
    /// Output file stem (default: input file stem)
    #[arg(short = 'o', long, value_name = "STEM")]
    basename: Option<String>,
    /// Export the resolved label table as JSON
    #[arg(long, value_name = "FILE")]
    labels_out: Option<PathBuf>,
    /// Input assembly file
    #[arg(value_name = "ASMFILE")]
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let outputs = match (opts.bin, opts.hex) {
        (false, false) | (true, true) => OutputSet::BIN | OutputSet::HEX,
        (true, false) => OutputSet::BIN,
        (false, true) => OutputSet::HEX,
    };

    let source = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;

    let asm = Assembler::new(AsmOptions {
        strict: opts.strict,
        comment: opts.comment,
    });
    let listing = asm.assemble(&source)?;

    let dir = opts.input.parent().unwrap_or(Path::new("."));
    let stem = match &opts.basename {
        Some(stem) => stem.clone(),
        None => opts
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "out".to_string()),
    };

    if outputs.contains(OutputSet::BIN) {
        let path = dir.join(format!("{stem}.bin"));
        std::fs::write(&path, listing.binary_lines().join("\n"))
            .with_context(|| format!("writing {}", path.display()))?;
        println!("File created at '{}'", path.display());
    }
    if outputs.contains(OutputSet::HEX) {
        let path = dir.join(format!("{stem}.hex"));
        std::fs::write(&path, listing.hex_lines().join("\n"))
            .with_context(|| format!("writing {}", path.display()))?;
        println!("File created at '{}'", path.display());
    }
    if let Some(path) = &opts.labels_out {
        std::fs::write(path, serde_json::to_string_pretty(&listing.labels)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}
