//! Compute geodesic distances between every source and destination zip code.
//!
//! Usage:
//!   zip_distance --src a.csv --dst b.csv [--outfile out.csv]
//!                [--zip-to-lat-long-lookup-file US.txt] [--log-level debug]

use anyhow::Result;
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use zip_distance::dataset::{self, ZIP_LAT_LONG_LOOKUP_URL};
use zip_distance::emitter::{csv_sink, emit};
use zip_distance::events::{Observer, TracingObserver};
use zip_distance::lookup;
use zip_distance::models::LookupTable;
use zip_distance::zip_reader::ZipCodeReader;

#[derive(Parser, Debug)]
#[command(name = "zip_distance")]
#[command(about = "Compute geodesic distances between two lists of zip codes")]
struct Args {
    /// Source address CSV path
    #[arg(long, default_value = "sample_address_file_a.csv")]
    src: PathBuf,

    /// Destination address CSV path
    #[arg(long, default_value = "sample_address_file_b.csv")]
    dst: PathBuf,

    /// Output file path (prints to stdout if omitted)
    #[arg(long)]
    outfile: Option<PathBuf>,

    /// Tab delimited zip → lat/long file; downloaded from --lookup-url if omitted
    #[arg(long)]
    zip_to_lat_long_lookup_file: Option<PathBuf>,

    /// Where to download the lookup archive from
    #[arg(long, default_value = ZIP_LAT_LONG_LOOKUP_URL)]
    lookup_url: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

async fn load_lookup(args: &Args, observer: &TracingObserver) -> Result<LookupTable> {
    let table = match &args.zip_to_lat_long_lookup_file {
        Some(path) => lookup::build(File::open(path)?, &path.display().to_string(), observer)?,
        None => {
            let dataset = dataset::download_and_extract(&args.lookup_url, observer).await?;
            lookup::build(
                dataset.open()?,
                &dataset.path().display().to_string(),
                observer,
            )?
        }
    };
    Ok(table)
}

/// Destinations are opened first, so their header problems are reported first.
fn open_tables<'o>(
    args: &Args,
    observer: &'o dyn Observer,
) -> zip_distance::Result<(ZipCodeReader<'o, File>, ZipCodeReader<'o, File>)> {
    let destinations = ZipCodeReader::from_path(&args.dst, observer)?;
    let sources = ZipCodeReader::from_path(&args.src, observer)?;
    Ok((sources, destinations))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(io::stderr)
        .init();

    info!("Starting zip distance computation");
    let observer = TracingObserver;

    let table = load_lookup(&args, &observer).await?;
    if table.is_empty() {
        warn!("Zip code lookup is empty; every zip code will fail to resolve");
    }

    let (sources, destinations) = open_tables(&args, &observer)?;

    let out: Box<dyn Write> = match &args.outfile {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut sink = csv_sink(out);

    let summary = emit(&table, sources, destinations, &mut sink, &observer)?;
    info!(
        "Done: {} sources × {} destinations",
        summary.sources, summary.destinations
    );

    Ok(())
}
