//! Fetching the geonames reference dataset when no local copy is given.

use crate::error::{DistanceError, Result};
use crate::events::{Event, Observer};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ZIP_LAT_LONG_LOOKUP_URL: &str = "http://download.geonames.org/export/zip/US.zip";

/// Extracted dataset; the temporary directory is removed on drop.
pub struct ReferenceDataset {
    _dir: TempDir,
    path: PathBuf,
}

impl ReferenceDataset {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn open(&self) -> Result<File> {
        Ok(File::open(&self.path)?)
    }
}

fn archive_name(url: &str) -> &str {
    url.rsplit('/').next().filter(|n| !n.is_empty()).unwrap_or("dataset.zip")
}

/// `US.zip` → `US.txt`
fn text_file_name(archive: &str) -> String {
    let stem = archive.split('.').next().unwrap_or(archive);
    format!("{stem}.txt")
}

/// Download `url` into a temporary directory and unpack it.
pub async fn download_and_extract(url: &str, observer: &dyn Observer) -> Result<ReferenceDataset> {
    observer.notify(&Event::DownloadStarted {
        url: url.to_string(),
    });

    let response = reqwest::get(url).await?.error_for_status()?;
    let bytes = response.bytes().await?;

    let dir = TempDir::new()?;
    let archive_path = dir.path().join(archive_name(url));
    fs::write(&archive_path, &bytes)?;

    let path = extract_archive(&archive_path, dir.path())?;
    observer.notify(&Event::DownloadExtracted {
        path: path.display().to_string(),
    });

    Ok(ReferenceDataset { _dir: dir, path })
}

/// Unpack `archive_path` into `to_dir` and return the path of the text file named
/// after the archive.
pub fn extract_archive(archive_path: &Path, to_dir: &Path) -> Result<PathBuf> {
    let mut archive = zip::ZipArchive::new(File::open(archive_path)?)?;
    archive.extract(to_dir)?;

    let archive_file = archive_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let expected = to_dir.join(text_file_name(&archive_file));

    if !expected.is_file() {
        let mut found: Vec<String> = fs::read_dir(to_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        found.sort();
        return Err(DistanceError::MissingDatasetFile {
            archive: archive_path.display().to_string(),
            expected: expected.display().to_string(),
            found,
        });
    }

    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_archive(path: &Path, entries: &[(&str, &str)]) {
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, body) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_names_from_url() {
        assert_eq!(archive_name(ZIP_LAT_LONG_LOOKUP_URL), "US.zip");
        assert_eq!(text_file_name("US.zip"), "US.txt");
        assert_eq!(text_file_name("allCountries.zip"), "allCountries.txt");
    }

    #[test]
    fn test_extracts_matching_text_file() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("US.zip");
        write_archive(&archive, &[("US.txt", "US\t94101\n"), ("readme.txt", "hi")]);

        let path = extract_archive(&archive, dir.path()).unwrap();

        assert_eq!(path, dir.path().join("US.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "US\t94101\n");
    }

    #[test]
    fn test_missing_text_file_lists_contents() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("US.zip");
        write_archive(&archive, &[("readme.txt", "hi")]);

        match extract_archive(&archive, dir.path()) {
            Err(DistanceError::MissingDatasetFile { found, expected, .. }) => {
                assert!(expected.ends_with("US.txt"));
                assert_eq!(found, vec!["US.zip", "readme.txt"]);
            }
            other => panic!("expected missing dataset file, got {other:?}"),
        }
    }
}
