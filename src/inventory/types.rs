use serde::{Deserialize, Serialize};

const BYTES_PER_GB: f64 = 1_073_741_824.0; // 2^30

/// Raw volume entry as reported by a storage inventory service.
///
/// Capacity fields are already normalised: a value the transport could not
/// supply is zero, never missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixedDisk {
    pub device_id: String,
    pub volume_name: Option<String>,
    pub file_system: Option<String>,
    pub total_bytes: u64,
    pub free_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordStatus {
    Ok,
    Failed,
}

/// One row of the report: either a disk on a reachable host, or the single
/// failure entry for a host that could not be queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskRecord {
    #[serde(rename = "Server")]
    pub server: String,
    #[serde(rename = "Drive")]
    pub drive: Option<String>,
    #[serde(rename = "VolumeName")]
    pub volume_name: Option<String>,
    #[serde(rename = "FileSystem")]
    pub file_system: Option<String>,
    #[serde(rename = "TotalGB")]
    pub total_gb: Option<f64>,
    #[serde(rename = "UsedGB")]
    pub used_gb: Option<f64>,
    #[serde(rename = "FreeGB")]
    pub free_gb: Option<f64>,
    #[serde(rename = "PercentFree")]
    pub percent_free: Option<f64>,
    #[serde(rename = "Status")]
    pub status: RecordStatus,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl DiskRecord {
    /// Build an OK record from a raw inventory entry, deriving the GB figures.
    pub fn from_disk(server: &str, disk: &FixedDisk) -> Self {
        let total = disk.total_bytes;
        let free = disk.free_bytes;
        let total_gb = to_gb(total);
        let free_gb = to_gb(free);

        let (used_gb, percent_free) = if total > 0 {
            let percent = (free as f64 / total as f64 * 100.0).min(100.0);
            (to_gb(total.saturating_sub(free)), round2(percent))
        } else {
            (0.0, 0.0)
        };

        Self {
            server: server.to_string(),
            drive: Some(disk.device_id.clone()),
            volume_name: disk.volume_name.clone(),
            file_system: disk.file_system.clone(),
            total_gb: Some(total_gb),
            used_gb: Some(used_gb),
            free_gb: Some(free_gb),
            percent_free: Some(percent_free),
            status: RecordStatus::Ok,
            error: None,
        }
    }

    /// Build the failure record for a host. Disk fields stay empty.
    pub fn failed(server: &str, error: impl Into<String>) -> Self {
        Self {
            server: server.to_string(),
            drive: None,
            volume_name: None,
            file_system: None,
            total_gb: None,
            used_gb: None,
            free_gb: None,
            percent_free: None,
            status: RecordStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == RecordStatus::Failed
    }
}

fn to_gb(bytes: u64) -> f64 {
    if bytes == 0 {
        return 0.0;
    }
    round2(bytes as f64 / BYTES_PER_GB)
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
