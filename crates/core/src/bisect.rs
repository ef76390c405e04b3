//! Block bisect search over timestamped log files.

use std::fs::File;
use std::io::Write;

use anyhow::Result;

use crate::range::SearchRange;
use crate::timestamp::{self, Timestamp};

/// Granularity of the binary search. A probe inspects one block, so finding
/// the start of the range costs O(log(blocks)) probes before the linear scan.
const BLOCK_SIZE: usize = 8192;

/// Iterator over the timestamps in a buffer, in offset order.
struct Entries<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Entries<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }
}

impl Iterator for Entries<'_> {
    /// Byte offset of the timestamp and its parsed value.
    type Item = (usize, Timestamp);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.data.len() {
            let at = self.pos + timestamp::find_in(&self.data[self.pos..])?;
            match timestamp::extract_at(self.data, at) {
                Some((ts, len)) => {
                    self.pos = at + len;
                    return Some((at, ts));
                }
                // Shaped like a timestamp but with out-of-range components.
                // Step past it and keep scanning.
                None => self.pos = at + 1,
            }
        }
        None
    }
}

/// Index of the last block whose first timestamp is still below `target`,
/// i.e. the block where the linear scan should begin. Blocks with no
/// parseable timestamp steer the search left, which is the safe direction.
fn lower_bound_block(data: &[u8], target: Timestamp) -> usize {
    let mut begin = 0;
    let mut end = data.len() / BLOCK_SIZE;

    while begin < end {
        let mid = (begin + end) / 2;
        let block_start = mid * BLOCK_SIZE;
        let block = &data[block_start..(block_start + BLOCK_SIZE).min(data.len())];

        match Entries::new(block, 0).next() {
            Some((_, ts)) if ts < target => begin = mid + 1,
            _ => end = mid,
        }
    }
    begin.saturating_sub(1)
}

/// Streams every log entry whose timestamp falls within `range` to `out`.
///
/// An entry is the bytes from one timestamp to the next, so continuation
/// lines that carry no timestamp of their own travel with the entry that
/// produced them. Entries are emitted in file order; the scan stops at the
/// first entry past the end of the range.
pub fn bisect<W: Write>(file: &File, range: &SearchRange, mut out: W) -> Result<()> {
    if file.metadata()?.len() == 0 {
        return Ok(());
    }

    let data = unsafe { memmap2::Mmap::map(file)? };
    #[cfg(unix)]
    data.advise(memmap2::Advice::Random)?;

    let from = lower_bound_block(&data, range.start) * BLOCK_SIZE;

    let mut entries = Entries::new(&data, from);
    let mut cur = loop {
        match entries.next() {
            Some((at, ts)) if ts >= range.start => break (at, ts),
            Some(_) => continue,
            None => return Ok(()),
        }
    };

    while cur.1 <= range.end {
        match entries.next() {
            Some((at, ts)) => {
                out.write_all(&data[cur.0..at])?;
                cur = (at, ts);
            }
            None => {
                out.write_all(&data[cur.0..])?;
                break;
            }
        }
    }
    Ok(())
}
