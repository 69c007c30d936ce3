//! Xiphos CLI binary.

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use xiphos::cli::{XiphosArgs, execute_command};

fn main() -> anyhow::Result<()> {
    let args = XiphosArgs::parse();

    let default_level = match args.verbosity() {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("xiphos={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command(&args, &mut out).context("xiphos command failed")?;
    Ok(())
}
