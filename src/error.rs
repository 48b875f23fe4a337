use thiserror::Error;

pub type Result<T> = std::result::Result<T, DistanceError>;

#[derive(Debug, Error)]
pub enum DistanceError {
    #[error(
        "Error trying to parse values from line {row} of file: {raw:?}. \
         Expected to parse zip from column {zip_column}, latitude from column {lat_column} \
         or longitude from column {long_column}"
    )]
    Parse {
        row: usize,
        raw: Vec<String>,
        zip_column: usize,
        lat_column: usize,
        long_column: usize,
    },

    #[error("Expected to find a header row with Zip Code in {source_name}, but found: {header:?}")]
    Schema { source_name: String, header: Vec<String> },

    #[error("No zip codes read from {source_name}")]
    EmptyInput { source_name: String },

    #[error("Zip code {zip:?} has no entry in the latitude/longitude lookup")]
    LookupMiss { zip: String },

    #[error("Failed to download reference dataset: {0}")]
    Download(String),

    #[error("Failed to extract zip archive: {0}")]
    Archive(String),

    #[error("Expected the zip archive {archive} to contain {expected}. But found: {found:?}")]
    MissingDatasetFile {
        archive: String,
        expected: String,
        found: Vec<String>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for DistanceError {
    fn from(err: reqwest::Error) -> Self {
        DistanceError::Download(err.to_string())
    }
}

impl From<zip::result::ZipError> for DistanceError {
    fn from(err: zip::result::ZipError) -> Self {
        DistanceError::Archive(err.to_string())
    }
}
