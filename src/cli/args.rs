//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Interactive forestry simulator: manage forests of trees with growth, culling, and binary snapshots
#[derive(Parser, Debug)]
#[command(name = "forestry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Forest source names; each loads `<name>.csv` from the source-data directory
    #[arg(required = true, value_name = "FOREST")]
    pub forests: Vec<String>,

    /// Override the source-data directory
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub source_dir: Option<PathBuf>,

    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count)]
    pub debug: u8,
}
