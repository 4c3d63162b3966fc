//! Full CLI library for Warden
//!

#![deny(missing_docs)]

mod cmd;

use anyhow::{Context, Result};
use clap::Parser;

use warden_core::{
    log_runtime,
    logging::{self, error, info},
    reconcile, RunSummary, WardenConfig,
};
use warden_ranger::RangerService;

use cmd::WardenArgs;

/// Main CLI entrypoint.
pub async fn cli() -> Result<()> {
    let args = WardenArgs::parse();
    let log_dir = (!args.no_log_file).then_some(args.log_dir.as_path());
    if let Some(path) = logging::setup(args.log_level, log_dir)? {
        info!("audit log: {}", path.display());
    }

    run(&args).await.map_err(|e| {
        error!("{e:#}");
        e
    })
}

async fn run(args: &WardenArgs) -> Result<()> {
    let config = WardenConfig::read_from_file(&args.config).with_context(|| {
        format!("unable to load configuration from {}", args.config.display())
    })?;
    let ranger = RangerService::new(&config.auth).context("setting up the Ranger client")?;

    let summary = log_runtime!(
        "reconciliation",
        reconcile::run(&ranger, &config, args.mode(), args.dry_run).await
    )?;

    if args.dry_run {
        print_plan(&summary);
    }
    println!("{summary}");
    Ok(())
}

fn print_plan(summary: &RunSummary) {
    if summary.planned.is_empty() {
        println!("No changes planned\n");
        return;
    }
    summary
        .planned
        .iter()
        .for_each(|change| println!("{}", textwrap::indent(&change.to_string(), "  ")));
}
