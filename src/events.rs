//! Progress and warning signals emitted by the pipeline.
//!
//! Components never log directly; they hand an [`Event`] to the [`Observer`]
//! they were given. The binary plugs in [`TracingObserver`].

use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    DownloadStarted { url: String },
    DownloadExtracted { path: String },
    LookupBuilt { source_name: String, entries: usize },
    /// A row was empty or too short and has been skipped
    MalformedRow {
        source_name: String,
        row: usize,
        expected_columns: usize,
        raw: Vec<String>,
    },
    ZipCodesRead { source_name: String, count: usize },
    Progress { written: usize },
    DistancesWritten { count: usize },
}

pub trait Observer {
    fn notify(&self, event: &Event);
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notify(&self, event: &Event) {
        match event {
            Event::DownloadStarted { url } => {
                info!("Downloading lookup for zip codes from {}", url)
            }
            Event::DownloadExtracted { path } => {
                debug!("Extracted reference dataset to {}", path)
            }
            Event::LookupBuilt { source_name, entries } => info!(
                "Read {} zip codes worth of latitudes and longitudes from {}",
                entries, source_name
            ),
            Event::MalformedRow {
                source_name,
                row,
                expected_columns,
                raw,
            } => warn!(
                "Ignoring line {} of {}: expected at least {} columns, but found: {:?}",
                row, source_name, expected_columns, raw
            ),
            Event::ZipCodesRead { source_name, count } => {
                info!("Read {} zip codes from {}", count, source_name)
            }
            Event::Progress { written } => debug!("Wrote {} distances...", written),
            Event::DistancesWritten { count } => info!("Computed {} distances", count),
        }
    }
}
