use anyhow::{ensure, Result};

use crate::tile::{Tile, MAX_LATITUDE};
use crate::tile_range::TileRange;

/// A geographic bounding box given as min/max latitude and longitude in
/// degrees.
///
/// # Example
/// ```rust
/// # use tile_stash::BoundingBox;
/// let tehran = BoundingBox::new(35.0, 36.0, 50.0, 53.0).unwrap();
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Creates a bounding box, rejecting degenerate extents and coordinates
    /// the projection cannot display (latitudes beyond ±85.0511°,
    /// longitudes beyond ±180°).
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Result<Self> {
        for (name, lat) in [("min_lat", min_lat), ("max_lat", max_lat)] {
            ensure!(
                lat >= -MAX_LATITUDE && lat <= MAX_LATITUDE,
                "{} ({}) must be within ±{}",
                name,
                lat,
                MAX_LATITUDE,
            );
        }
        for (name, lon) in [("min_lon", min_lon), ("max_lon", max_lon)] {
            ensure!(
                lon >= -180_f64 && lon <= 180_f64,
                "{} ({}) must be within ±180",
                name,
                lon,
            );
        }
        ensure!(
            min_lat < max_lat,
            "min_lat ({}) must be south of max_lat ({})",
            min_lat,
            max_lat,
        );
        ensure!(
            min_lon < max_lon,
            "min_lon ({}) must be west of max_lon ({})",
            min_lon,
            max_lon,
        );

        Ok(BoundingBox {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }

    /// The rectangle of tiles covering this box at `zoom`, spanned by the
    /// tiles containing the northwest and southeast corners.
    pub fn tile_range(&self, zoom: u8) -> Result<TileRange> {
        let nw = Tile::from_lat_lon(self.max_lat, self.min_lon, zoom)?;
        let se = Tile::from_lat_lon(self.min_lat, self.max_lon, zoom)?;

        Ok(TileRange::new(zoom, nw.x, se.x, nw.y, se.y))
    }
}

/// A bounding box fixture containing preset coordinates for a known
/// geographic region.
#[derive(Clone, Copy, Debug)]
pub enum Fixture {
    Tehran,
}

impl std::str::FromStr for Fixture {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.to_lowercase().starts_with("tehran") {
            return Ok(Fixture::Tehran);
        }

        Err("unrecognized fixture")
    }
}

impl From<Fixture> for BoundingBox {
    fn from(fixture: Fixture) -> Self {
        match fixture {
            Fixture::Tehran => BoundingBox {
                min_lat: 35.0,
                max_lat: 36.0,
                min_lon: 50.0,
                max_lon: 53.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_boxes() {
        assert!(BoundingBox::new(36.0, 35.0, 50.0, 53.0).is_err());
        assert!(BoundingBox::new(35.0, 35.0, 50.0, 53.0).is_err());
        assert!(BoundingBox::new(35.0, 36.0, 53.0, 50.0).is_err());
        assert!(BoundingBox::new(35.0, 91.0, 50.0, 53.0).is_err());
        assert!(BoundingBox::new(35.0, 36.0, 50.0, 200.0).is_err());
        assert!(BoundingBox::new(f64::NAN, 36.0, 50.0, 53.0).is_err());
    }

    #[test]
    fn corner_tiles_are_ordered() {
        let bbox = BoundingBox::from(Fixture::Tehran);
        let nw = Tile::from_lat_lon(bbox.max_lat, bbox.min_lon, 15).unwrap();
        let se = Tile::from_lat_lon(bbox.min_lat, bbox.max_lon, 15).unwrap();

        assert!(nw.x <= se.x);
        assert!(nw.y <= se.y);
    }

    #[test]
    fn tehran_point_falls_inside_the_tehran_rectangle() {
        let range = BoundingBox::new(35.0, 36.0, 50.0, 53.0)
            .unwrap()
            .tile_range(15)
            .unwrap();
        let tile = Tile::from_lat_lon(35.7, 51.4, 15).unwrap();

        assert!(range.min_x() <= tile.x && tile.x <= range.max_x());
        assert!(range.min_y() <= tile.y && tile.y <= range.max_y());
    }

    #[test]
    fn zoom_zero_covers_a_single_tile() {
        let range = BoundingBox::from(Fixture::Tehran).tile_range(0).unwrap();
        assert_eq!(range.count(), 1);
    }

    #[test]
    fn parses_fixture_names() {
        assert!(matches!("tehran".parse(), Ok(Fixture::Tehran)));
        assert!(matches!("Tehran".parse(), Ok(Fixture::Tehran)));
        assert!("atlantis".parse::<Fixture>().is_err());
    }
}
