//! Zip → coordinate lookup built from the geonames postal code dump.
//!
//! The dump is tab delimited with the following columns:
//!
//! | # | field        | notes                    |
//! |---|--------------|--------------------------|
//! | 1 | country code | optional                 |
//! | 2 | postal code  |                          |
//! | 3 | place name   | optional                 |
//! | 4-9 | admin name/code 1-3 | optional        |
//! | 10 | latitude    | WGS84                    |
//! | 11 | longitude   | WGS84                    |

use crate::error::{DistanceError, Result};
use crate::events::{Event, Observer};
use crate::lines::{self, LineCursor};
use crate::models::{LookupTable, ZipCoordinate};
use csv::StringRecord;
use std::io::Read;

pub const ZIP_COLUMN: usize = 1;
pub const LATITUDE_COLUMN: usize = 9;
pub const LONGITUDE_COLUMN: usize = 10;

const MIN_COLUMNS: usize = LONGITUDE_COLUMN + 1;

/// Build the lookup from a tab delimited reference dataset.
///
/// Blank and short rows are reported as [`Event::MalformedRow`] and skipped. A latitude or
/// longitude that does not parse aborts the build with [`DistanceError::Parse`].
pub fn build<R: Read>(
    input: R,
    source_name: &str,
    observer: &dyn Observer,
) -> Result<LookupTable> {
    let mut reader = lines::reader_builder()
        .delimiter(b'\t')
        .has_headers(false)
        .from_reader(lines::terminated(input));

    let cursor = LineCursor::new(1);
    let mut table = LookupTable::new();
    let mut record = StringRecord::new();

    while reader.read_record(&mut record)? {
        let (blank_rows, row) = cursor.locate(&record, reader.position().line());
        for blank in blank_rows {
            observer.notify(&malformed(source_name, blank, Vec::new()));
        }

        if lines::is_blank(&record) {
            observer.notify(&malformed(source_name, row, Vec::new()));
            continue;
        }
        if record.len() < MIN_COLUMNS {
            observer.notify(&malformed(source_name, row, raw_fields(&record)));
            continue;
        }

        let latitude = parse_degrees(&record[LATITUDE_COLUMN]);
        let longitude = parse_degrees(&record[LONGITUDE_COLUMN]);
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(DistanceError::Parse {
                row,
                raw: raw_fields(&record),
                zip_column: ZIP_COLUMN + 1,
                lat_column: LATITUDE_COLUMN + 1,
                long_column: LONGITUDE_COLUMN + 1,
            });
        };

        table.insert(
            record[ZIP_COLUMN].trim().to_string(),
            ZipCoordinate::new(latitude, longitude),
        );
    }

    observer.notify(&Event::LookupBuilt {
        source_name: source_name.to_string(),
        entries: table.len(),
    });

    Ok(table)
}

fn parse_degrees(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok()
}

fn raw_fields(record: &StringRecord) -> Vec<String> {
    record
        .iter()
        .map(|f| f.trim_end_matches('\r').to_string())
        .collect()
}

fn malformed(source_name: &str, row: usize, raw: Vec<String>) -> Event {
    Event::MalformedRow {
        source_name: source_name.to_string(),
        row,
        expected_columns: MIN_COLUMNS,
        raw,
    }
}
