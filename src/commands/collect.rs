use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use crate::cli::Cli;
use crate::config::{CollectOptions, Settings};
use crate::inventory::{
    collect_disk_report, LocalInventory, PingProbe, ReachabilityProbe, RoutedInventory,
    SshInventory, StorageInventory,
};
use crate::output::{print_info, print_success, render_table, summary_line};
use crate::report::{default_report_path, sort_records, write_csv};
use crate::targets::resolve_targets;

pub fn handle_collect_command(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load(cli.config.as_deref())?;
    let options = CollectOptions::from_settings(
        settings,
        cli.probe_timeout,
        cli.ssh_user.clone(),
        cli.ssh_port,
    );

    let probe = PingProbe::new(options.probe_timeout);
    let inventory = RoutedInventory::new(
        LocalInventory::new(),
        SshInventory::new(options.ssh.clone()),
        &options.local_aliases,
    );

    let out_path = run_report(cli, &probe, &inventory)?;
    print_success(&format!("Report written to {}", out_path.display()));
    Ok(())
}

/// Resolve targets, collect, then print and export. Configuration problems
/// surface before the probe is ever called.
pub fn run_report(
    cli: &Cli,
    probe: &dyn ReachabilityProbe,
    inventory: &dyn StorageInventory,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let targets = resolve_targets(&cli.computer_name, cli.computer_list_path.as_deref())?;
    info!(count = targets.len(), "resolved targets");

    let mut records = collect_disk_report(&targets, probe, inventory);
    sort_records(&mut records);

    print!("{}", render_table(&records));
    print_info(&summary_line(targets.len(), &records));

    let out_path = cli
        .out_csv_path
        .clone()
        .unwrap_or_else(|| default_report_path(Local::now()));
    write_csv(&records, &out_path)?;

    Ok(out_path)
}
