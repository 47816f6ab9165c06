use thiserror::Error;
use tracing::debug;

use crate::inventory::collect_local::LocalInventory;
use crate::inventory::collect_remote::SshInventory;
use crate::inventory::types::FixedDisk;

/// Failure of the storage query once the host has answered ping.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Lists the fixed (non-removable, non-network) volumes of a host.
pub trait StorageInventory {
    fn list_fixed_disks(&self, host: &str) -> Result<Vec<FixedDisk>, InventoryError>;
}

/// Sends hosts that name this machine to the local enumerator and everything
/// else over ssh.
pub struct RoutedInventory {
    local: LocalInventory,
    remote: SshInventory,
    local_names: Vec<String>,
}

impl RoutedInventory {
    pub fn new(local: LocalInventory, remote: SshInventory, aliases: &[String]) -> Self {
        let mut local_names: Vec<String> = ["localhost", "127.0.0.1", "::1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        if let Some(hostname) = sysinfo::System::host_name() {
            local_names.push(hostname.to_lowercase());
        }
        local_names.extend(aliases.iter().map(|a| a.trim().to_lowercase()));

        Self {
            local,
            remote,
            local_names,
        }
    }

    pub fn is_local(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.local_names.iter().any(|name| *name == host)
    }
}

impl StorageInventory for RoutedInventory {
    fn list_fixed_disks(&self, host: &str) -> Result<Vec<FixedDisk>, InventoryError> {
        if self.is_local(host) {
            debug!(host, "querying local volumes");
            self.local.list_fixed_disks(host)
        } else {
            debug!(host, "querying volumes over ssh");
            self.remote.list_fixed_disks(host)
        }
    }
}
