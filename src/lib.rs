//! Pairwise geodesic distances between two lists of US zip codes.
//!
//! A reference table (geonames `US.txt` layout) is turned into a zip → coordinate
//! lookup, the source and destination tables are read for their `Zip Code`
//! column, and every source × destination pair is written out as a CSV row.

pub mod dataset;
pub mod emitter;
pub mod error;
pub mod events;
pub mod geodesic;
mod lines;
pub mod lookup;
pub mod models;
pub mod zip_reader;

pub use error::{DistanceError, Result};
