use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(name = "disk-report")]
#[command(about = "Report fixed-disk capacity and free space across a set of servers")]
pub struct Cli {
    /// Hosts to query (repeat the flag or separate with commas)
    #[arg(short = 'c', long = "computer-name", value_delimiter = ',')]
    pub computer_name: Vec<String>,

    /// Text file with one host per line
    #[arg(short = 'l', long = "computer-list-path")]
    pub computer_list_path: Option<PathBuf>,

    /// Where to write the CSV export (default: ./DiskReport_<timestamp>.csv)
    #[arg(short = 'o', long = "out-csv-path")]
    pub out_csv_path: Option<PathBuf>,

    /// YAML settings file (default: <config dir>/disk-report/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Reachability probe timeout in seconds
    #[arg(long = "probe-timeout")]
    pub probe_timeout: Option<u64>,

    /// User for ssh connections to remote hosts
    #[arg(long = "ssh-user")]
    pub ssh_user: Option<String>,

    /// Port for ssh connections to remote hosts
    #[arg(long = "ssh-port")]
    pub ssh_port: Option<u16>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computer_names_accept_commas_and_repeats() {
        let cli = Cli::try_parse_from(["disk-report", "-c", "a,b", "--computer-name", "c"]).unwrap();
        assert_eq!(cli.computer_name, ["a", "b", "c"]);
        assert!(cli.computer_list_path.is_none());
    }

    #[test]
    fn parses_paths_and_overrides() {
        let cli = Cli::try_parse_from([
            "disk-report",
            "-l",
            "servers.txt",
            "-o",
            "out.csv",
            "--probe-timeout",
            "5",
            "--ssh-user",
            "ops",
            "--ssh-port",
            "2200",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.computer_list_path, Some(PathBuf::from("servers.txt")));
        assert_eq!(cli.out_csv_path, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.probe_timeout, Some(5));
        assert_eq!(cli.ssh_user.as_deref(), Some("ops"));
        assert_eq!(cli.ssh_port, Some(2200));
        assert_eq!(cli.verbose, 2);
    }
}
