//! Entry point for the `ii` command.

use anyhow::Result;
use clap::Parser;
use ii_catalog::environment::EnvironmentPaths;
use ii_catalog::{Cli, commands, interrupt, logging};
use std::io::{self, Write};

fn main() {
    if let Err(err) = run() {
        for line in format!("{err:#}").lines() {
            eprintln!("ERROR: {line}");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose());
    interrupt::install()?;

    let paths = EnvironmentPaths::discover()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli, &paths, &mut out)?;
    out.flush()?;
    Ok(())
}
