use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;

use forestry::cli::args::Cli;
use forestry::cli::commands::execute_command;
use forestry::cli::output;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    tracing::debug!("logging initialized at {}", filter);
}
