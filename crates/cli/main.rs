use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use logbisect_core::{bisect, SearchRange};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input file to search
    file: PathBuf,

    /// Target time range (YYYY-MM-DD HH:MM:SS[+|-|~]<number><unit>)
    #[arg(short = 't', long = "time")]
    time: SearchRange,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        println!("target range: {} .. {}", args.time.start, args.time.end);
        println!("processing file: {}", args.file.display());
    }

    let file = File::open(&args.file)
        .with_context(|| format!("could not open {}", args.file.display()))?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    bisect(&file, &args.time, &mut out)?;
    out.flush()?;
    Ok(())
}
