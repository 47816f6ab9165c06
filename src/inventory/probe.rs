use std::process::{Command, Stdio};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid host name {0:?}")]
    InvalidHost(String),
}

/// Lightweight connectivity check run before the inventory query.
pub trait ReachabilityProbe {
    fn probe(&self, host: &str) -> Result<bool, ProbeError>;
}

/// Command-line dialect of the system `ping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingFlavor {
    /// `-n count -w millis`
    Windows,
    /// macOS / FreeBSD / DragonFly: `-W` is in milliseconds
    Bsd,
    /// iputils and busybox: `-W` is in seconds
    Linux,
}

impl PingFlavor {
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(any(
            target_os = "macos",
            target_os = "freebsd",
            target_os = "dragonfly"
        )) {
            Self::Bsd
        } else {
            Self::Linux
        }
    }
}

/// Single ICMP echo through the system `ping` binary.
#[derive(Debug, Clone)]
pub struct PingProbe {
    timeout: Duration,
    flavor: PingFlavor,
}

impl PingProbe {
    pub fn new(timeout: Duration) -> Self {
        Self::with_flavor(timeout, PingFlavor::current())
    }

    pub fn with_flavor(timeout: Duration, flavor: PingFlavor) -> Self {
        Self { timeout, flavor }
    }

    fn args(&self, host: &str) -> Vec<String> {
        let millis = self.timeout.as_millis().max(1).to_string();
        let mut args: Vec<String> = match self.flavor {
            PingFlavor::Windows => vec!["-n".into(), "1".into(), "-w".into(), millis],
            PingFlavor::Bsd => vec!["-c".into(), "1".into(), "-W".into(), millis],
            PingFlavor::Linux => {
                let secs = self.timeout.as_secs().max(1).to_string();
                vec!["-c".into(), "1".into(), "-W".into(), secs]
            }
        };
        args.push(host.to_string());
        args
    }
}

impl ReachabilityProbe for PingProbe {
    fn probe(&self, host: &str) -> Result<bool, ProbeError> {
        // Windows ping has no end-of-options marker, so refuse anything
        // that would be read as a flag.
        if host.starts_with('-') {
            return Err(ProbeError::InvalidHost(host.to_string()));
        }

        let status = Command::new("ping")
            .args(self.args(host))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| ProbeError::Spawn {
                program: "ping",
                source,
            })?;

        debug!(host, code = ?status.code(), "ping finished");
        Ok(status.success())
    }
}
