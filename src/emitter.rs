//! Source × destination distance table.

use crate::error::{DistanceError, Result};
use crate::events::{Event, Observer};
use crate::geodesic::distance_miles;
use crate::models::{DistanceRecord, LookupTable, ZipCoordinate, OUTPUT_HEADER};
use crate::zip_reader::ZipCodeReader;
use csv::{Writer, WriterBuilder};
use std::io::{Read, Write};

const PROGRESS_EVERY: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitSummary {
    pub sources: usize,
    pub destinations: usize,
    pub rows_written: usize,
}

/// CSV writer for the output table; the header is written by [`emit`].
pub fn csv_sink<W: Write>(out: W) -> Writer<W> {
    WriterBuilder::new().has_headers(false).from_writer(out)
}

fn resolve(lookup: &LookupTable, zip: &str) -> Result<ZipCoordinate> {
    lookup.get(zip).ok_or_else(|| DistanceError::LookupMiss {
        zip: zip.to_string(),
    })
}

/// Write one row per (source, destination) pair, sources in the outer loop.
///
/// Destinations are resolved up front and kept in memory; sources and output rows
/// are streamed. Any zip code missing from `lookup` aborts the run.
pub fn emit<S: Read, D: Read, W: Write>(
    lookup: &LookupTable,
    mut sources: ZipCodeReader<'_, S>,
    mut destinations: ZipCodeReader<'_, D>,
    sink: &mut Writer<W>,
    observer: &dyn Observer,
) -> Result<EmitSummary> {
    let mut resolved = Vec::new();
    for zip in destinations.by_ref() {
        let zip = zip?;
        let coordinate = resolve(lookup, &zip)?;
        resolved.push((zip, coordinate));
    }
    let destination_count = destinations.finish()?;

    sink.write_record(OUTPUT_HEADER)?;

    let mut written = 0;
    for source_zip in sources.by_ref() {
        let source_zip = source_zip?;
        let source = resolve(lookup, &source_zip)?;

        for (destination_zip, destination) in &resolved {
            sink.serialize(DistanceRecord {
                source_zip: &source_zip,
                destination_zip,
                distance_miles: distance_miles(source, *destination),
            })?;
            written += 1;
            if written % PROGRESS_EVERY == 0 {
                observer.notify(&Event::Progress { written });
            }
        }
    }
    let source_count = sources.finish()?;
    sink.flush()?;

    observer.notify(&Event::DistancesWritten { count: written });

    Ok(EmitSummary {
        sources: source_count,
        destinations: destination_count,
        rows_written: written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::testing::RecordingObserver;
    use crate::lookup;

    const REFERENCE: &str = "\
US\t94101\tSan Francisco\tCalifornia\tCA\tSan Francisco\t075\t\t\t37.77\t-122.42
US\t02134\tAllston\tMassachusetts\tMA\tSuffolk\t025\t\t\t42.3539\t-71.1337
US\t10001\tNew York\tNew York\tNY\tNew York\t061\t\t\t40.7484\t-73.9967
";

    fn run(src: &str, dst: &str) -> (Result<EmitSummary>, String) {
        let observer = RecordingObserver::default();
        let table = lookup::build(REFERENCE.as_bytes(), "US.txt", &observer).unwrap();
        let sources = ZipCodeReader::new(src.as_bytes(), "src.csv", &observer).unwrap();
        let destinations = ZipCodeReader::new(dst.as_bytes(), "dst.csv", &observer).unwrap();

        let mut sink = csv_sink(vec![]);
        let result = emit(&table, sources, destinations, &mut sink, &observer);
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        (result, out)
    }

    #[test]
    fn test_same_zip_is_zero_miles() {
        let (result, out) = run("Zip Code\n94101\n", "Zip Code\n94101\n");

        assert_eq!(
            result.unwrap(),
            EmitSummary {
                sources: 1,
                destinations: 1,
                rows_written: 1
            }
        );
        assert_eq!(
            out,
            "Source Zip Code,Destination Zip Code,Geodic Distance\n94101,94101,0.0\n"
        );
    }

    #[test]
    fn test_cross_product_order_with_duplicates() {
        let (result, out) = run(
            "Name,Zip Code\nA,10001\nB,94101\nC,10001\n",
            "zip code\n02134\n94101\n02134\n",
        );
        assert_eq!(result.unwrap().rows_written, 9);

        let pairs: Vec<(String, String)> = out
            .lines()
            .skip(1)
            .map(|line| {
                let mut cols = line.split(',');
                (cols.next().unwrap().to_string(), cols.next().unwrap().to_string())
            })
            .collect();
        let expected: Vec<(String, String)> = ["10001", "94101", "10001"]
            .iter()
            .flat_map(|s| {
                ["02134", "94101", "02134"]
                    .iter()
                    .map(move |d| (s.to_string(), d.to_string()))
            })
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_distances_are_positive_between_different_zips() {
        let (result, out) = run("Zip Code\n94101\n", "Zip Code\n02134\n");
        result.unwrap();

        let row = out.lines().nth(1).unwrap();
        let miles: f64 = row.rsplit(',').next().unwrap().parse().unwrap();
        assert!(miles > 2600.0 && miles < 2800.0, "got {miles}");
    }

    #[test]
    fn test_unknown_destination_writes_nothing() {
        let (result, out) = run("Zip Code\n94101\n", "Zip Code\n94101\n99999\n");

        match result {
            Err(DistanceError::LookupMiss { zip }) => assert_eq!(zip, "99999"),
            other => panic!("expected lookup miss, got {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_unknown_source_aborts() {
        let (result, _) = run("Zip Code\n94101\n00000\n", "Zip Code\n10001\n");

        match result {
            Err(DistanceError::LookupMiss { zip }) => assert_eq!(zip, "00000"),
            other => panic!("expected lookup miss, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_source_is_reported() {
        let (result, _) = run("Zip Code\n", "Zip Code\n10001\n");

        match result {
            Err(DistanceError::EmptyInput { source_name }) => assert_eq!(source_name, "src.csv"),
            other => panic!("expected empty input, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_destination_is_reported_before_header() {
        let (result, out) = run("Zip Code\n10001\n", "Zip Code\n");

        match result {
            Err(DistanceError::EmptyInput { source_name }) => assert_eq!(source_name, "dst.csv"),
            other => panic!("expected empty input, got {other:?}"),
        }
        assert!(out.is_empty());
    }
}
