//! Download the raster map tiles covering a region into a local file
//! cache, one request at a time.
//!
//! **Use with care.** Bulk downloads strain public tile servers. Respect
//! the usage policy of the server you point this at and leave the
//! inter-request delay in place.
//!
//! # Usage
//!
//! The `tile-stash` binary features a helpful CLI you can access via
//! `-h` / `--help`. The same functionality is available as a library.
//!
//! # CLI Example
//!
//! ```bash
//! tile-stash \
//!   --min-lat 35 \
//!   --max-lat 36 \
//!   --min-lon 50 \
//!   --max-lon 53 \
//!   --zoom 15 \
//!   --output tehran_tiles
//! ```
//!
//! # Library Example
//! ```no_run
//! use std::{path::PathBuf, time::Duration};
//! use tile_stash::{fetch, BoundingBox, Config, UrlFormat};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     bounding_box: BoundingBox::new(35.0, 36.0, 50.0, 53.0)?,
//!     min_zoom: 15,
//!     max_zoom: 15,
//!     url: UrlFormat::from_string(
//!         "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_owned(),
//!     ),
//!     base_folder: PathBuf::from("tehran_tiles"),
//!     request_timeout: Duration::from_secs(10),
//!     inter_request_delay: Duration::from_secs(1),
//!     column_lower_bound: None,
//! };
//!
//! let report = fetch(config).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

mod bounding_box;
mod cache;
mod config;
mod fetch;
mod tile;
mod tile_range;
mod url;

pub use bounding_box::{BoundingBox, Fixture};
pub use cache::CacheStatus;
pub use config::Config;
pub use fetch::{fetch, FetchReport};
pub use tile::{FetchOutcome, Tile, MAX_LATITUDE, MAX_ZOOM};
pub use tile_range::TileRange;
pub use url::UrlFormat;
