use serde::Serialize;
use std::collections::HashMap;

/// Latitude/longitude pair in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZipCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl ZipCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Zip code → coordinate mapping, built once per run
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: HashMap<String, ZipCoordinate>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the coordinate for a zip code.
    pub fn insert(&mut self, zip: String, coordinate: ZipCoordinate) {
        self.entries.insert(zip, coordinate);
    }

    pub fn get(&self, zip: &str) -> Option<ZipCoordinate> {
        self.entries.get(zip).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Column names of the output table
pub const OUTPUT_HEADER: [&str; 3] = ["Source Zip Code", "Destination Zip Code", "Geodic Distance"];

/// One output row
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceRecord<'a> {
    #[serde(rename = "Source Zip Code")]
    pub source_zip: &'a str,
    #[serde(rename = "Destination Zip Code")]
    pub destination_zip: &'a str,
    #[serde(rename = "Geodic Distance")]
    pub distance_miles: f64,
}
