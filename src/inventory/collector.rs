use thiserror::Error;
use tracing::{info, info_span, warn};

use crate::inventory::probe::{ProbeError, ReachabilityProbe};
use crate::inventory::service::{InventoryError, StorageInventory};
use crate::inventory::types::{DiskRecord, FixedDisk};

/// Everything that can go wrong for a single host. Never escapes
/// [`collect_disk_report`]; each one becomes a failure record.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Ping failed")]
    Unreachable,
    #[error("Ping failed: {0}")]
    ProbeFailed(#[from] ProbeError),
    #[error("{0}")]
    InventoryQuery(#[from] InventoryError),
}

/// Probe then query one host.
pub fn query_host(
    host: &str,
    probe: &dyn ReachabilityProbe,
    inventory: &dyn StorageInventory,
) -> Result<Vec<FixedDisk>, HostError> {
    if !probe.probe(host)? {
        return Err(HostError::Unreachable);
    }
    Ok(inventory.list_fixed_disks(host)?)
}

/// Turn every target into report rows, one host at a time, in order.
pub fn collect_disk_report(
    targets: &[String],
    probe: &dyn ReachabilityProbe,
    inventory: &dyn StorageInventory,
) -> Vec<DiskRecord> {
    let mut records = Vec::new();

    for host in targets {
        let _span = info_span!("host", %host).entered();

        match query_host(host, probe, inventory) {
            Ok(disks) => {
                if disks.is_empty() {
                    info!("host reported no fixed disks");
                }
                records.extend(disks.iter().map(|disk| DiskRecord::from_disk(host, disk)));
            }
            Err(e) => {
                warn!(error = %e, "host failed");
                records.push(DiskRecord::failed(host, e.to_string()));
            }
        }
    }

    records
}


#[cfg(test)]
mod tests {
    use super::fakes::{FakeInventory, FakeProbe};
    use super::*;
    use crate::inventory::types::RecordStatus;

    const GIB: u64 = 1 << 30;

    fn disk(id: &str, total: u64, free: u64) -> FixedDisk {
        FixedDisk {
            device_id: id.to_string(),
            volume_name: Some(format!("/dev/{}", id.trim_start_matches('/'))),
            file_system: Some("ext4".to_string()),
            total_bytes: total,
            free_bytes: free,
        }
    }

    fn hosts(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reachable_and_unreachable_hosts() {
        let probe = FakeProbe {
            reachable: hosts(&["A"]),
            ..Default::default()
        };
        let mut inventory = FakeInventory::default();
        inventory
            .disks
            .insert("A".to_string(), vec![disk("/", 100 * GIB, 40 * GIB)]);

        let records = collect_disk_report(&hosts(&["A", "B"]), &probe, &inventory);

        assert_eq!(records.len(), 2);
        let a = &records[0];
        assert_eq!(a.server, "A");
        assert_eq!(a.total_gb, Some(100.0));
        assert_eq!(a.free_gb, Some(40.0));
        assert_eq!(a.used_gb, Some(60.0));
        assert_eq!(a.percent_free, Some(40.0));
        assert_eq!(a.status, RecordStatus::Ok);

        let b = &records[1];
        assert_eq!(b.server, "B");
        assert_eq!(b.status, RecordStatus::Failed);
        assert_eq!(b.error.as_deref(), Some("Ping failed"));

        // unreachable hosts are never queried
        assert_eq!(*inventory.calls.borrow(), ["A"]);
    }

    #[test]
    fn probe_error_counts_as_unreachable() {
        let probe = FakeProbe {
            broken: hosts(&["A"]),
            ..Default::default()
        };
        let inventory = FakeInventory::default();

        let records = collect_disk_report(&hosts(&["A"]), &probe, &inventory);

        assert_eq!(records.len(), 1);
        assert!(records[0].is_failed());
        assert!(records[0].error.as_deref().unwrap().starts_with("Ping failed: "));
        assert!(inventory.calls.borrow().is_empty());
    }

    #[test]
    fn inventory_error_becomes_failure_and_run_continues() {
        let probe = FakeProbe {
            reachable: hosts(&["A", "B"]),
            ..Default::default()
        };
        let mut inventory = FakeInventory {
            denied: hosts(&["A"]),
            ..Default::default()
        };
        inventory.disks.insert(
            "B".to_string(),
            vec![disk("/", 10 * GIB, 5 * GIB), disk("/data", 20 * GIB, GIB)],
        );

        let records = collect_disk_report(&hosts(&["A", "B"]), &probe, &inventory);

        assert_eq!(records.len(), 3);
        assert!(records[0].is_failed());
        assert_eq!(
            records[0].error.as_deref(),
            Some("authentication failed: access denied")
        );
        assert!(records[1..].iter().all(|r| !r.is_failed()));
    }

    #[test]
    fn reachable_host_without_disks_contributes_nothing() {
        let probe = FakeProbe {
            reachable: hosts(&["empty"]),
            ..Default::default()
        };
        let inventory = FakeInventory::default();

        let records = collect_disk_report(&hosts(&["empty"]), &probe, &inventory);

        assert!(records.is_empty());
    }

    #[test]
    fn each_host_probed_once_in_order_duplicates_included() {
        let probe = FakeProbe {
            reachable: hosts(&["x", "y"]),
            ..Default::default()
        };
        let inventory = FakeInventory::default();

        collect_disk_report(&hosts(&["y", "x", "y"]), &probe, &inventory);

        assert_eq!(*probe.calls.borrow(), ["y", "x", "y"]);
        assert_eq!(*inventory.calls.borrow(), ["y", "x", "y"]);
    }

    #[test]
    fn failure_records_always_carry_a_message() {
        let probe = FakeProbe {
            reachable: hosts(&["ok"]),
            broken: hosts(&["broken"]),
            ..Default::default()
        };
        let inventory = FakeInventory {
            denied: hosts(&["ok"]),
            ..Default::default()
        };

        let targets = hosts(&["ok", "broken", "gone"]);
        let records = collect_disk_report(&targets, &probe, &inventory);

        assert_eq!(records.len(), targets.len());
        for r in &records {
            assert!(r.is_failed());
            assert!(!r.error.as_deref().unwrap_or("").is_empty());
            assert!(r.drive.is_none() && r.total_gb.is_none());
        }
    }
}
