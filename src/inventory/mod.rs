// Disk inventory collection modules
pub mod types;
pub mod probe;
pub mod service;
pub mod collect_local;
pub mod collect_remote;
pub mod collector;

// Re-export the pieces the command layer wires together
pub use collect_local::LocalInventory;
pub use collect_remote::{SshInventory, SshOptions};
pub use collector::collect_disk_report;
pub use probe::{PingProbe, ReachabilityProbe};
pub use service::{RoutedInventory, StorageInventory};
pub use types::DiskRecord;
