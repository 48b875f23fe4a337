//! Lazy reader for the `Zip Code` column of a comma delimited table.

use crate::error::{DistanceError, Result};
use crate::events::{Event, Observer};
use crate::lines::{self, LineCursor};
use csv::StringRecordsIntoIter;
use std::fs::File;
use std::io::{Chain, Read};
use std::path::Path;

const ZIP_CODE_HEADER: &str = "zip code";

/// Yields trimmed zip codes one row at a time.
///
/// The header is checked up front, so a missing `Zip Code` column fails in
/// [`ZipCodeReader::new`]. Whether anything was read at all can only be known once
/// the iterator is exhausted; call [`ZipCodeReader::finish`] at that point.
pub struct ZipCodeReader<'o, R> {
    source_name: String,
    column: usize,
    records: StringRecordsIntoIter<Chain<R, &'static [u8]>>,
    cursor: LineCursor,
    count: usize,
    observer: &'o dyn Observer,
}

impl<'o> ZipCodeReader<'o, File> {
    pub fn from_path(path: &Path, observer: &'o dyn Observer) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(file, &path.display().to_string(), observer)
    }
}

impl<'o, R: Read> ZipCodeReader<'o, R> {
    pub fn new(input: R, source_name: &str, observer: &'o dyn Observer) -> Result<Self> {
        let mut reader = lines::reader_builder()
            .has_headers(true)
            .from_reader(lines::terminated(input));

        let header = reader.headers()?.clone();
        let column = header
            .iter()
            .position(|name| name.trim().to_lowercase() == ZIP_CODE_HEADER)
            .ok_or_else(|| DistanceError::Schema {
                source_name: source_name.to_string(),
                header: header
                    .iter()
                    .map(|name| name.trim_end_matches('\r').to_string())
                    .collect(),
            })?;

        Ok(Self {
            source_name: source_name.to_string(),
            column,
            cursor: LineCursor::new(reader.position().line()),
            records: reader.into_records(),
            count: 0,
            observer,
        })
    }

    /// Zip codes yielded so far
    pub fn yielded(&self) -> usize {
        self.count
    }

    /// Report the total once the rows are exhausted.
    ///
    /// Fails with [`DistanceError::EmptyInput`] if no zip code was yielded.
    pub fn finish(self) -> Result<usize> {
        if self.count == 0 {
            return Err(DistanceError::EmptyInput {
                source_name: self.source_name,
            });
        }
        self.observer.notify(&Event::ZipCodesRead {
            source_name: self.source_name,
            count: self.count,
        });
        Ok(self.count)
    }
}

impl<R: Read> Iterator for ZipCodeReader<'_, R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            };
            let (blank_rows, row) = self
                .cursor
                .locate(&record, self.records.reader().position().line());
            for blank in blank_rows {
                self.warn_skipped(blank, Vec::new());
            }

            if lines::is_blank(&record) {
                self.warn_skipped(row, Vec::new());
                continue;
            }
            match record.get(self.column) {
                Some(zip) => {
                    self.count += 1;
                    return Some(Ok(zip.trim().to_string()));
                }
                None => self.warn_skipped(row, record.iter().map(str::to_string).collect()),
            }
        }
    }
}

impl<R> ZipCodeReader<'_, R> {
    fn warn_skipped(&self, row: usize, raw: Vec<String>) {
        self.observer.notify(&Event::MalformedRow {
            source_name: self.source_name.clone(),
            row,
            expected_columns: self.column + 1,
            raw,
        });
    }
}
