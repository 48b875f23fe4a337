//! Row numbering that accounts for blank lines.
//!
//! `csv` drops empty lines without yielding a record. Comparing the reader's line
//! count before and after each record recovers them: newlines the record itself
//! does not account for belong to blank rows in front of it.
//!
//! This only holds when every record ends in `\n`, so readers are built with
//! [`reader_builder`] and their input wrapped with [`terminated`].

use csv::{ReaderBuilder, StringRecord, Terminator};
use std::io::{Chain, Read};
use std::ops::Range;

pub(crate) fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.flexible(true).terminator(Terminator::Any(b'\n'));
    builder
}

/// Guarantee a newline after the last record.
pub(crate) fn terminated<R: Read>(input: R) -> Chain<R, &'static [u8]> {
    input.chain(&b"\n"[..])
}

/// A `\r\n` line read with a `\n` terminator
pub(crate) fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].trim_end_matches('\r').is_empty()
}

pub(crate) struct LineCursor {
    first_line: u64,
}

impl LineCursor {
    /// `first_line` is the file line numbered as row 1.
    pub(crate) fn new(first_line: u64) -> Self {
        Self { first_line }
    }

    /// Blank rows in front of `record` and the record's own row, given the
    /// reader's line right after reading it.
    pub(crate) fn locate(&self, record: &StringRecord, line_after: u64) -> (Range<usize>, usize) {
        let before = record
            .position()
            .map(|p| p.line())
            .unwrap_or(self.first_line);
        let blanks = line_after
            .saturating_sub(before)
            .saturating_sub(lines_spanned(record));
        let start = before + blanks;
        (self.row(before)..self.row(start), self.row(start))
    }

    fn row(&self, line: u64) -> usize {
        (line.saturating_sub(self.first_line) + 1) as usize
    }
}

/// Quoted fields may contain line breaks.
fn lines_spanned(record: &StringRecord) -> u64 {
    1 + record
        .iter()
        .map(|f| f.matches('\n').count() as u64)
        .sum::<u64>()
}
