use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::debug;

use crate::inventory::DiskRecord;

pub const CSV_HEADER: [&str; 10] = [
    "Server",
    "Drive",
    "VolumeName",
    "FileSystem",
    "TotalGB",
    "UsedGB",
    "FreeGB",
    "PercentFree",
    "Status",
    "Error",
];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Order records by server, then drive. A failure record has no drive and
/// so sorts first within its host.
pub fn sort_records(records: &mut [DiskRecord]) {
    records.sort_by(compare_records);
}

fn compare_records(a: &DiskRecord, b: &DiskRecord) -> Ordering {
    a.server
        .to_lowercase()
        .cmp(&b.server.to_lowercase())
        .then_with(|| a.server.cmp(&b.server))
        .then_with(|| a.drive.cmp(&b.drive))
}

/// `DiskReport_<YYYY-MM-DD_HH-MM-SS>.csv` in the current directory.
pub fn default_report_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("DiskReport_{}.csv", now.format("%Y-%m-%d_%H-%M-%S")))
}

/// Write every record, including the error column, with a header row.
pub fn write_csv(records: &[DiskRecord], path: &Path) -> Result<(), ReportError> {
    let wrap = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    // Header is written by hand so an empty report still gets one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(wrap)?;
    writer.write_record(CSV_HEADER).map_err(wrap)?;
    for record in records {
        writer.serialize(record).map_err(wrap)?;
    }
    writer.flush().map_err(|e| wrap(e.into()))?;

    debug!(path = %path.display(), rows = records.len(), "report written");
    Ok(())
}

/// Read an export back. Empty fields come back as absent values.
#[cfg(test)]
pub fn read_csv(path: &Path) -> Result<Vec<DiskRecord>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    reader.deserialize().collect()
}
