use sysinfo::Disks;

use crate::inventory::service::{InventoryError, StorageInventory};
use crate::inventory::types::FixedDisk;

/// Filesystems that never count as fixed disks: network mounts and
/// kernel/virtual filesystems.
pub const SKIPPED_FILESYSTEMS: &[&str] = &[
    // network
    "nfs", "nfs4", "cifs", "smbfs", "smb3", "afs", "9p", "sshfs", "fuse.sshfs", "glusterfs",
    "ceph", "davfs", "fuse.rclone",
    // pseudo
    "tmpfs", "devtmpfs", "ramfs", "proc", "sysfs", "cgroup", "cgroup2", "overlay", "squashfs",
    "devfs", "autofs", "efivarfs", "tracefs", "debugfs", "securityfs", "fusectl", "nsfs",
    "iso9660", "udf",
];

pub fn is_fixed_filesystem(fs_type: &str) -> bool {
    let fs_type = fs_type.to_lowercase();
    !SKIPPED_FILESYSTEMS.contains(&fs_type.as_str())
}

/// Enumerates this machine's own volumes.
#[derive(Debug, Default)]
pub struct LocalInventory;

impl LocalInventory {
    pub fn new() -> Self {
        Self
    }
}

impl StorageInventory for LocalInventory {
    fn list_fixed_disks(&self, _host: &str) -> Result<Vec<FixedDisk>, InventoryError> {
        let disks = Disks::new_with_refreshed_list();

        let fixed = disks
            .iter()
            .filter(|disk| !disk.is_removable())
            .filter_map(|disk| {
                let file_system = disk.file_system().to_string_lossy().to_string();
                if !is_fixed_filesystem(&file_system) {
                    return None;
                }

                let name = disk.name().to_string_lossy().to_string();
                Some(FixedDisk {
                    device_id: disk.mount_point().to_string_lossy().to_string(),
                    volume_name: Some(name).filter(|n| !n.is_empty()),
                    file_system: Some(file_system).filter(|f| !f.is_empty()),
                    total_bytes: disk.total_space(),
                    free_bytes: disk.available_space(),
                })
            })
            .collect();

        Ok(fixed)
    }
}
