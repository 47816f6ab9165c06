use std::process::Command;

use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::inventory::collect_local::is_fixed_filesystem;
use crate::inventory::service::{InventoryError, StorageInventory};
use crate::inventory::types::FixedDisk;

/// POSIX output, filesystem type column, byte-sized blocks, local mounts only.
const DF_COMMAND: &str = "df -PT -B1 -l";

/// Connection settings for the system `ssh` client.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SshOptions {
    pub user: Option<String>,
    pub port: Option<u16>,
    pub identity_file: Option<String>,
    pub connect_timeout_secs: u64,
}

impl Default for SshOptions {
    fn default() -> Self {
        Self {
            user: None,
            port: None,
            identity_file: None,
            connect_timeout_secs: 5,
        }
    }
}

/// Queries a remote host by running `df` over ssh in batch mode.
#[derive(Debug, Clone)]
pub struct SshInventory {
    options: SshOptions,
}

impl SshInventory {
    pub fn new(options: SshOptions) -> Self {
        Self { options }
    }

    fn args(&self, host: &str) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={}", self.options.connect_timeout_secs),
        ];
        if let Some(port) = self.options.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        if let Some(identity) = &self.options.identity_file {
            args.push("-i".to_string());
            args.push(identity.clone());
        }
        let destination = match &self.options.user {
            Some(user) => format!("{}@{}", user, host),
            None => host.to_string(),
        };
        // Stop option parsing so a host can never be read as an ssh flag
        args.push("--".to_string());
        args.push(destination);
        args.push(DF_COMMAND.to_string());
        args
    }
}

impl StorageInventory for SshInventory {
    fn list_fixed_disks(&self, host: &str) -> Result<Vec<FixedDisk>, InventoryError> {
        let output = Command::new("ssh")
            .args(self.args(host))
            .output()
            .map_err(|e| InventoryError::Transport(format!("could not run ssh: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        trace!(host, %stdout, "df output");

        let disks = interpret_df_result(output.status.code(), &stdout, &stderr)?;
        debug!(host, count = disks.len(), "parsed remote volumes");
        Ok(disks)
    }
}

/// Decide what a finished `ssh .. df` run means.
///
/// GNU `df` exits 1 when a single mount cannot be stat'ed (a stale NFS
/// handle, a permission-restricted bind mount) while still printing every
/// other row. Those rows are kept; the host only fails when nothing usable
/// came back.
pub fn interpret_df_result(
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<Vec<FixedDisk>, InventoryError> {
    match code {
        Some(0) => Ok(parse_df_output(stdout)),
        Some(1) => {
            let disks = parse_df_output(stdout);
            if disks.is_empty() {
                return Err(classify_failure(code, stderr));
            }
            warn!(stderr = %stderr.trim(), "df reported errors for some mounts");
            Ok(disks)
        }
        _ => Err(classify_failure(code, stderr)),
    }
}

/// Map an ssh / remote command exit to an inventory error.
///
/// ssh itself exits 255 on connection or authentication problems; any other
/// code is the remote command's own exit status.
pub fn classify_failure(code: Option<i32>, stderr: &str) -> InventoryError {
    let message = stderr.trim().lines().last().unwrap_or("").trim().to_string();
    match code {
        Some(255) if stderr.contains("Permission denied") => InventoryError::Auth(message),
        Some(255) => InventoryError::Transport(if message.is_empty() {
            "ssh connection failed".to_string()
        } else {
            message
        }),
        Some(127) => InventoryError::NotFound(if message.is_empty() {
            "df not available on remote host".to_string()
        } else {
            message
        }),
        Some(code) => InventoryError::Transport(if message.is_empty() {
            format!("remote command exited with status {}", code)
        } else {
            message
        }),
        None => InventoryError::Transport("ssh terminated by signal".to_string()),
    }
}

/// Parse `df -PT -B1` output into fixed disk entries.
///
/// Columns: source, type, size, used, available, capacity, mount point. The
/// mount point may contain spaces, so everything after the sixth column is
/// joined back together. Size columns that are `-` or unparsable count as 0.
pub fn parse_df_output(text: &str) -> Vec<FixedDisk> {
    let mut disks = Vec::new();

    for line in text.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 7 {
            continue;
        }

        let fs_type = fields[1];
        if !is_fixed_filesystem(fs_type) {
            continue;
        }

        disks.push(FixedDisk {
            device_id: fields[6..].join(" "),
            volume_name: Some(fields[0].to_string()),
            file_system: Some(fs_type.to_string()),
            total_bytes: parse_bytes(fields[2]),
            free_bytes: parse_bytes(fields[4]),
        });
    }

    disks
}

fn parse_bytes(field: &str) -> u64 {
    field.parse::<u64>().unwrap_or(0)
}
