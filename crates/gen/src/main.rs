use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use logbisect_core::gen::{self, GenerateConfig};

const PROGRESS_EVERY: u64 = 100_000;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a large sample log file")]
struct Args {
    /// Where to write the generated log
    #[arg(long, default_value = gen::DEFAULT_PATH)]
    path: PathBuf,

    /// Number of lines to write
    #[arg(long, default_value_t = gen::DEFAULT_COUNT)]
    count: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = GenerateConfig {
        path: args.path,
        count: args.count,
    };

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&config.path)
        .with_context(|| format!("could not open {} for writing", config.path.display()))?;

    let mut stdout = stdout().lock();
    let mut writer = BufWriter::new(file);

    let mut written = 0;
    while written < config.count {
        let next = (written + PROGRESS_EVERY).min(config.count);
        gen::write_entries(&mut writer, written..next)?;
        written = next;

        write!(stdout, "\r{}: Wrote {written} lines", config.path.display())?;
        stdout.flush()?;
    }
    writer.flush()?;
    writeln!(stdout)?;
    Ok(())
}
