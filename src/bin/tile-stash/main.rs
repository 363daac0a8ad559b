mod args;
mod validators;

use anyhow::{bail, Result};
use args::Args;
use clap::Parser;
use tile_stash::{fetch, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    let dry_run = args.dry_run;
    let config: Config = args.try_into()?;

    if dry_run {
        let tile_count = config.tile_count()?;

        eprintln!(
            "would fetch {} tiles (approx {}, assuming 10 kb per tile)",
            tile_count,
            pretty_bytes::converter::convert((tile_count as f64) * 10_000f64)
        );

        return Ok(());
    }

    let report = fetch(config).await?;
    println!("{report}");

    if report.failed() > 0 {
        bail!("{} tiles failed to download", report.failed());
    }

    Ok(())
}
