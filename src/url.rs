use anyhow::{Context, Result};
use maplit::hashmap;
use strfmt::strfmt;

use crate::tile::Tile;

/// A tile-server URL template with `{x}`, `{y}` and `{z}` replacement
/// specifiers, e.g. `https://tile.openstreetmap.org/{z}/{x}/{y}.png`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UrlFormat {
    format_str: String,
}

impl UrlFormat {
    pub fn from_string(format_str: String) -> Self {
        Self { format_str }
    }

    /// Renders the URL for a single tile. Fails on templates with
    /// placeholders other than `{x}`, `{y}` and `{z}`.
    pub fn tile_url(&self, tile: &Tile) -> Result<String> {
        let vars = hashmap! {
            "x".to_owned() => tile.x.to_string(),
            "y".to_owned() => tile.y.to_string(),
            "z".to_owned() => tile.z.to_string(),
        };

        strfmt(&self.format_str, &vars).context("failed formatting URL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_in_tile_indices() {
        let fmt =
            UrlFormat::from_string("https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_owned());
        let url = fmt.tile_url(&Tile::new(21500, 13000, 15)).unwrap();
        assert_eq!(url, "https://tile.openstreetmap.org/15/21500/13000.png");
    }

    #[test]
    fn rejects_unknown_placeholders() {
        let fmt = UrlFormat::from_string("https://{s}.example.org/{z}/{x}/{y}.png".to_owned());
        assert!(fmt.tile_url(&Tile::new(1, 2, 3)).is_err());
    }
}
