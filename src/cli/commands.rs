//! Wires settings, persistence, and the interactive session together.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::services::{ForestStore, Session, TreeGenerator};
use crate::cli::args::Cli;
use crate::cli::output;
use crate::config::Settings;
use crate::infrastructure::RealFileSystem;

pub fn execute_command(cli: &Cli) -> Result<()> {
    let mut settings = Settings::load()?;
    if let Some(dir) = &cli.source_dir {
        settings.source_dir = dir.clone();
    }
    debug!("settings: {:?}", settings);

    if !settings.source_dir.is_dir() {
        output::warning(&format!(
            "source directory {} does not exist; forests will start empty",
            settings.source_dir.display()
        ));
    }

    let fs = Arc::new(RealFileSystem);
    let store = ForestStore::new(
        fs,
        settings.source_dir.clone(),
        settings.snapshot_dir.clone(),
    );
    let generator = TreeGenerator::new(settings.generate.clone());
    let mut session = Session::new(store, generator, rand::thread_rng(), cli.forests.clone());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    session.bootstrap(&mut out)?;
    session.run(&mut input, &mut out)?;
    Ok(())
}
