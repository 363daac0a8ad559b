use anyhow::{ensure, Context, Result};
use clap::crate_version;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::time::Duration;
use tokio::fs;

use crate::cache::CacheStatus;
use crate::config::Config;
use crate::tile::{FetchOutcome, Tile};

const ZERO_DURATION: Duration = Duration::from_secs(0);

/// Tally of per-tile outcomes over one [`fetch`] run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FetchReport {
    /// Tiles fetched and written to disk.
    pub downloaded: u64,

    /// Tiles skipped because a valid cached copy exists.
    pub skipped: u64,

    /// Tiles skipped because a file exists but does not look like a PNG.
    pub skipped_unverified: u64,

    /// Tiles the server answered with a non-success status.
    pub http_errors: u64,

    /// Tiles whose request never produced a response.
    pub transport_errors: u64,
}

impl FetchReport {
    fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Downloaded => self.downloaded += 1,
            FetchOutcome::Skipped(CacheStatus::PresentUnverified) => {
                self.skipped_unverified += 1
            }
            FetchOutcome::Skipped(_) => self.skipped += 1,
            FetchOutcome::HttpError(_) => self.http_errors += 1,
            FetchOutcome::TransportError(_) => self.transport_errors += 1,
        }
    }

    /// Number of tiles that could not be downloaded.
    pub fn failed(&self) -> u64 {
        self.http_errors + self.transport_errors
    }
}

impl fmt::Display for FetchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} downloaded, {} skipped, {} failed",
            self.downloaded,
            self.skipped + self.skipped_unverified,
            self.failed(),
        )
    }
}

/// Sequentially fetch the tiles covering the configured bounding box and
/// save them below `cfg.base_folder`.
///
/// Creates the required directories recursively. Tiles already present on
/// disk are skipped, not re-downloaded.
///
/// A failure on an individual tile does not abort the run. It is counted
/// in the returned [`FetchReport`] and reported as a status line on
/// stdout, like every other tile. Only local errors (the file system, a
/// malformed URL template) end the run early.
///
/// # Example
/// ```no_run
/// use std::{path::PathBuf, time::Duration};
/// use tile_stash::{fetch, BoundingBox, Config, UrlFormat};
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let config = Config {
///     bounding_box: BoundingBox::new(35.0, 36.0, 50.0, 53.0)?,
///     min_zoom: 15,
///     max_zoom: 15,
///     url: UrlFormat::from_string(
///         "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_owned(),
///     ),
///     base_folder: PathBuf::from("tehran_tiles"),
///     request_timeout: Duration::from_secs(10),
///     inter_request_delay: Duration::from_secs(1),
///     column_lower_bound: None,
/// };
///
/// let report = fetch(config).await?;
/// println!("{report}");
/// # Ok(())
/// # }
/// ```
pub async fn fetch(cfg: Config) -> Result<FetchReport> {
    let base_folder = cfg.base_folder.as_path();

    ensure!(
        !base_folder.exists() || base_folder.is_dir(),
        "output location {} is not a directory",
        base_folder.display(),
    );

    if !base_folder.exists() {
        fs::create_dir_all(base_folder)
            .await
            .context("failed to create root output directory")?;
    }

    let mut builder =
        reqwest::Client::builder().user_agent(format!("tile-stash/{}", crate_version!()));
    if cfg.request_timeout > ZERO_DURATION {
        builder = builder.timeout(cfg.request_timeout);
    }

    let client = builder.build().context("failed creating HTTP client")?;

    let pb = ProgressBar::new(cfg.tile_count()?);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:60.cyan/blue} {pos:>7}/{len:7} ETA: {eta} {msg}",
        )
        .context("failed building progress style")?
        .progress_chars("##-"),
    );

    let mut report = FetchReport::default();

    for zoom in cfg.min_zoom..=cfg.max_zoom {
        let covering = cfg.bounding_box.tile_range(zoom)?;
        pb.suspend(|| {
            println!(
                "Zoom level {} - X tiles {} to {}, Y tiles {} to {}",
                zoom,
                covering.min_x(),
                covering.max_x(),
                covering.min_y(),
                covering.max_y(),
            )
        });

        let range = covering.with_min_column(cfg.column_lower_bound);
        if range.is_empty() {
            log::debug!("zoom {} is empty after the column cutoff", zoom);
            continue;
        }

        for tile in range.tiles() {
            let outcome = tile.fetch_from(&client, &cfg.url, base_folder).await?;

            pb.suspend(|| println!("{}", status_line(&tile, &outcome)));
            report.record(&outcome);
            pb.inc(1);

            // The pause applies to skips as well, matching one-request-per-
            // second pacing only loosely.
            tokio::time::sleep(cfg.inter_request_delay).await;
        }
    }

    pb.finish_and_clear();

    Ok(report)
}

fn status_line(tile: &Tile, outcome: &FetchOutcome) -> String {
    match outcome {
        FetchOutcome::Downloaded => format!("Downloaded tile {}", tile),
        FetchOutcome::Skipped(CacheStatus::PresentUnverified) => {
            format!("Skipping tile {} (exists, unverified)", tile)
        }
        FetchOutcome::Skipped(_) => format!("Skipping tile {} (already downloaded)", tile),
        FetchOutcome::HttpError(code) => {
            format!("Failed to download tile {} - HTTP {}", tile, code)
        }
        FetchOutcome::TransportError(msg) => {
            format!("Error downloading tile {}: {}", tile, msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_tallies_every_outcome_kind() {
        let mut report = FetchReport::default();

        report.record(&FetchOutcome::Downloaded);
        report.record(&FetchOutcome::Downloaded);
        report.record(&FetchOutcome::Skipped(CacheStatus::PresentValid));
        report.record(&FetchOutcome::Skipped(CacheStatus::PresentUnverified));
        report.record(&FetchOutcome::HttpError(404));
        report.record(&FetchOutcome::TransportError("timed out".to_owned()));

        assert_eq!(report.downloaded, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.skipped_unverified, 1);
        assert_eq!(report.http_errors, 1);
        assert_eq!(report.transport_errors, 1);
        assert_eq!(report.failed(), 2);
    }

    #[test]
    fn report_displays_a_one_line_summary() {
        let mut report = FetchReport::default();
        report.record(&FetchOutcome::Downloaded);
        report.record(&FetchOutcome::Skipped(CacheStatus::PresentValid));
        report.record(&FetchOutcome::Skipped(CacheStatus::PresentUnverified));
        report.record(&FetchOutcome::HttpError(503));

        assert_eq!(report.to_string(), "1 downloaded, 2 skipped, 1 failed");
    }

    #[test]
    fn status_lines_name_the_tile_and_the_outcome() {
        let tile = Tile::new(21100, 12900, 15);

        assert_eq!(
            status_line(&tile, &FetchOutcome::Downloaded),
            "Downloaded tile 15/21100/12900",
        );
        assert_eq!(
            status_line(&tile, &FetchOutcome::Skipped(CacheStatus::PresentValid)),
            "Skipping tile 15/21100/12900 (already downloaded)",
        );
        assert_eq!(
            status_line(&tile, &FetchOutcome::Skipped(CacheStatus::PresentUnverified)),
            "Skipping tile 15/21100/12900 (exists, unverified)",
        );
        assert_eq!(
            status_line(&tile, &FetchOutcome::HttpError(404)),
            "Failed to download tile 15/21100/12900 - HTTP 404",
        );
        assert_eq!(
            status_line(
                &tile,
                &FetchOutcome::TransportError("connection refused".to_owned()),
            ),
            "Error downloading tile 15/21100/12900: connection refused",
        );
    }
}
