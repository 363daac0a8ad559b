use anyhow::Result;
use std::{path::PathBuf, time::Duration};

use crate::bounding_box::BoundingBox;
use crate::url::UrlFormat;

/// Tile fetching configuration, fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The region to cover.
    pub bounding_box: BoundingBox,

    /// First zoom level to fetch.
    pub min_zoom: u8,

    /// Last zoom level to fetch. An inverted zoom range covers nothing.
    pub max_zoom: u8,

    /// The URL template tiles are requested from, with the replacement
    /// specifiers `{x}`, `{y}` and `{z}`.
    pub url: UrlFormat,

    /// The folder the `z/x/y.png` hierarchy is written below.
    pub base_folder: PathBuf,

    /// Timeout for fetching a single tile.
    ///
    /// Pass the zero duration to disable the timeout.
    pub request_timeout: Duration,

    /// Pause inserted after every fetch invocation, downloads and skips
    /// alike.
    pub inter_request_delay: Duration,

    /// When set, columns west of this index are excluded at every zoom
    /// level.
    pub column_lower_bound: Option<usize>,
}

impl Config {
    /// Number of tiles one run over this configuration touches, with the
    /// column lower bound applied.
    pub fn tile_count(&self) -> Result<u64> {
        let mut total = 0;
        for zoom in self.min_zoom..=self.max_zoom {
            total += self
                .bounding_box
                .tile_range(zoom)?
                .with_min_column(self.column_lower_bound)
                .count();
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_config(min_zoom: u8, max_zoom: u8) -> Config {
        Config {
            bounding_box: BoundingBox::new(-85.0, 85.0, -180.0, 180.0).unwrap(),
            min_zoom,
            max_zoom,
            url: UrlFormat::from_string("http://localhost/{z}/{x}/{y}.png".to_owned()),
            base_folder: PathBuf::from("tiles"),
            request_timeout: Duration::from_secs(10),
            inter_request_delay: Duration::from_secs(1),
            column_lower_bound: None,
        }
    }

    #[test]
    fn counts_tiles_across_zoom_levels() {
        assert_eq!(world_config(1, 1).tile_count().unwrap(), 4);
        assert_eq!(world_config(2, 2).tile_count().unwrap(), 16);
        assert_eq!(world_config(1, 2).tile_count().unwrap(), 20);
    }

    #[test]
    fn column_lower_bound_shrinks_the_count() {
        let mut config = world_config(1, 1);

        config.column_lower_bound = Some(1);
        assert_eq!(config.tile_count().unwrap(), 2);

        config.column_lower_bound = Some(2);
        assert_eq!(config.tile_count().unwrap(), 0);
    }

    #[test]
    fn inverted_zoom_range_counts_nothing() {
        assert_eq!(world_config(2, 1).tile_count().unwrap(), 0);
    }
}
