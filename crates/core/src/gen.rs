//! Sample log file generation.
//!
//! Produces the numbered, timestamped lines the bisect search is built to
//! chew through. Lines stream through a [BufWriter] so memory stays flat no
//! matter how many are written.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::PathBuf;

use anyhow::Result;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

/// Output path used when none is given.
pub const DEFAULT_PATH: &str = "large_log_file.log";
/// Line count used when none is given.
pub const DEFAULT_COUNT: u64 = 10_000_000;

const LINE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]");

/// Where to write and how many lines.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub path: PathBuf,
    pub count: u64,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            count: DEFAULT_COUNT,
        }
    }
}

/// Writes one `<timestamp> Log entry <i>` line per index in `indices`.
///
/// The clock is sampled as each line is written, so timestamps are
/// non-decreasing across the file and reflect real write time.
pub fn write_entries<W: Write>(mut w: W, indices: Range<u64>) -> Result<()> {
    for i in indices {
        let now = OffsetDateTime::now_utc();
        now.format_into(&mut w, LINE_FORMAT)?;
        writeln!(w, " Log entry {i}")?;
    }
    Ok(())
}

/// Creates (or truncates) `config.path` and fills it with `config.count`
/// numbered lines. Prior content is unconditionally discarded. On error the
/// file may be left partial; no cleanup is attempted.
pub fn generate(config: &GenerateConfig) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&config.path)?;

    let mut writer = BufWriter::new(file);
    write_entries(&mut writer, 0..config.count)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::timestamp;

    fn generate_to(dir: &tempfile::TempDir, name: &str, count: u64) -> PathBuf {
        let path = dir.path().join(name);
        generate(&GenerateConfig {
            path: path.clone(),
            count,
        })
        .unwrap();
        path
    }

    #[test]
    fn test_exact_line_count_and_indices() {
        let dir = tempfile::tempdir().unwrap();
        let path = generate_to(&dir, "gen.log", 100);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 100);
        for (i, line) in lines.iter().enumerate() {
            assert!(line.ends_with(&format!(" Log entry {i}")), "{line:?}");
        }
    }

    #[test]
    fn test_line_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = generate_to(&dir, "gen.log", 3);

        let content = std::fs::read_to_string(&path).unwrap();
        for (i, line) in content.lines().enumerate() {
            let (_, len) = timestamp::extract_at(line.as_bytes(), 0)
                .unwrap_or_else(|| panic!("no timestamp in {line:?}"));
            // Six fractional digits, always.
            assert_eq!(len, timestamp::BASE_LEN + 1 + 6);
            assert_eq!(&line[len..], &format!(" Log entry {i}"));
        }
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let dir = tempfile::tempdir().unwrap();
        let path = generate_to(&dir, "gen.log", 1000);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut prev = None;
        for line in content.lines() {
            let (ts, _) = timestamp::extract_at(line.as_bytes(), 0).unwrap();
            if let Some(prev) = prev {
                assert!(prev <= ts);
            }
            prev = Some(ts);
        }
    }

    #[test]
    fn test_zero_count_yields_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = generate_to(&dir, "gen.log", 0);

        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_rerun_truncates() {
        let dir = tempfile::tempdir().unwrap();
        generate_to(&dir, "gen.log", 50);
        let path = generate_to(&dir, "gen.log", 3);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_open_failure_propagates() {
        let config = GenerateConfig {
            path: PathBuf::from("no/such/directory/gen.log"),
            count: 1,
        };
        assert!(generate(&config).is_err());
    }
}
