mod inventory;
mod cli;
mod commands;
mod config;
mod output;
mod report;
mod targets;

use clap::Parser;
use cli::Cli;
use commands::handle_collect_command;
use output::print_error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Map `-v` count to a level; RUST_LOG wins when set.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));

    // stdout carries the report table
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = handle_collect_command(&cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
