use anyhow::{ensure, Context, Result};
use reqwest::StatusCode;
use std::{
    f64::consts::PI,
    fmt,
    path::{Path, PathBuf},
};
use tokio::fs;

use crate::cache::{self, CacheStatus};
use crate::url::UrlFormat;

/// Northernmost latitude (in degrees) the Web Mercator projection can
/// display, `atan(sinh(π))`. Latitudes outside `±MAX_LATITUDE` have no tile
/// row and are rejected.
pub const MAX_LATITUDE: f64 = 85.05112877980659;

/// Highest supported zoom level. Tile indices at this level still fit the
/// `usize` x/y fields.
pub const MAX_ZOOM: u8 = 31;

/// An OSM slippy-map tile with x, y and z-coordinate.
/// ref: https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub z: u8,
}

/// What happened to a single tile during one fetch attempt.
///
/// HTTP and transport failures are values, not errors, so a batch keeps
/// running across them; only filesystem problems escape as `Err`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FetchOutcome {
    /// The tile was fetched and written to disk.
    Downloaded,
    /// A file already existed at the target path; no request was made.
    Skipped(CacheStatus),
    /// The server answered with a non-200 status code.
    HttpError(u16),
    /// The request never completed (timeout, refused connection, DNS
    /// failure, interrupted body).
    TransportError(String),
}

impl FetchOutcome {
    /// `true` for the two failure variants.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::HttpError(_) | Self::TransportError(_))
    }
}

impl Tile {
    pub fn new(x: usize, y: usize, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Computes the tile containing the given point (degrees) at the given
    /// zoom level.
    ///
    /// Latitudes outside `±MAX_LATITUDE` (the poles included) are a domain
    /// error, not something to clamp away. For accepted input both
    /// indices are within `[0, 2^zoom)`; the boundary meridian (180°) and
    /// the southern projection edge land on the last tile.
    pub fn from_lat_lon(lat: f64, lon: f64, zoom: u8) -> Result<Self> {
        ensure!(zoom <= MAX_ZOOM, "zoom ({}) must be <= {}", zoom, MAX_ZOOM);
        ensure!(
            lat >= -MAX_LATITUDE && lat <= MAX_LATITUDE,
            "latitude ({}) must be within ±{}",
            lat,
            MAX_LATITUDE,
        );
        ensure!(
            lon >= -180_f64 && lon <= 180_f64,
            "longitude ({}) must be within ±180",
            lon,
        );

        // scale factor
        let n = 2_f64.powi(i32::from(zoom));

        let x = (lon + 180_f64) / 360_f64 * n;
        let y = (1_f64 - lat.to_radians().tan().asinh() / PI) / 2_f64 * n;

        Ok(Self::new(
            x.min(n - 1_f64).max(0_f64) as usize,
            y.min(n - 1_f64).max(0_f64) as usize,
            zoom,
        ))
    }

    /// The path this tile is cached at below `base_folder`:
    /// `<base>/<z>/<x>/<y>.png`.
    pub fn target_path(&self, base_folder: &Path) -> PathBuf {
        let mut target = base_folder.join(self.z.to_string());
        target.push(self.x.to_string());
        target.push(format!("{}.png", self.y));
        target
    }

    /// Ensures this tile exists below `base_folder`, fetching it from
    /// `url_fmt` via the given HTTP client if it is not cached yet.
    ///
    /// Creates the intermediate directories as needed. An existing file is
    /// never overwritten or re-validated; the returned outcome says whether
    /// it carried a PNG signature. At most one request is made, with no
    /// retries: a non-200 response or a transport failure is reported as an
    /// outcome and leaves no file behind. Only filesystem and URL-template
    /// errors abort with `Err`.
    pub async fn fetch_from(
        &self,
        client: &reqwest::Client,
        url_fmt: &UrlFormat,
        base_folder: &Path,
    ) -> Result<FetchOutcome> {
        let url = url_fmt.tile_url(self)?;

        let target = self.target_path(base_folder);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).await.with_context(|| {
                format!("failed creating output directory for tile {}", self)
            })?;
        }

        match cache::check(&target) {
            CacheStatus::Absent => {}
            status => {
                log::debug!("tile {} already cached, skipping", self);
                return Ok(FetchOutcome::Skipped(status));
            }
        }

        let response = match client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => return Ok(FetchOutcome::TransportError(err.to_string())),
        };

        if response.status() != StatusCode::OK {
            return Ok(FetchOutcome::HttpError(response.status().as_u16()));
        }

        // The target file is only created once the whole body has arrived.
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => return Ok(FetchOutcome::TransportError(err.to_string())),
        };

        fs::write(&target, &body)
            .await
            .with_context(|| format!("failed writing tile {} to disk", self))?;

        Ok(FetchOutcome::Downloaded)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}
