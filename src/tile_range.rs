use crate::tile::{Tile, MAX_ZOOM};

/// The rectangle of tile indices covering a bounding box at one zoom level,
/// `min_x..=max_x` by `min_y..=max_y`.
///
/// A range can become empty (`min_x > max_x`) through
/// [`with_min_column`](Self::with_min_column); an empty range counts zero
/// tiles and iterates nothing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TileRange {
    zoom: u8,
    min_x: usize,
    max_x: usize,
    min_y: usize,
    max_y: usize,
}

impl TileRange {
    /// # Panics
    /// Panics on an inverted rectangle or indices outside the zoom level's
    /// grid.
    pub fn new(zoom: u8, min_x: usize, max_x: usize, min_y: usize, max_y: usize) -> Self {
        assert!(zoom <= MAX_ZOOM, "zoom ({}) must be <= {}", zoom, MAX_ZOOM);
        let n = 1usize << zoom;
        assert!(min_x <= max_x, "min_x ({}) must be <= max_x ({})", min_x, max_x);
        assert!(min_y <= max_y, "min_y ({}) must be <= max_y ({})", min_y, max_y);
        assert!(max_x < n, "max_x ({}) must be < {}", max_x, n);
        assert!(max_y < n, "max_y ({}) must be < {}", max_y, n);

        Self {
            zoom,
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn min_x(&self) -> usize {
        self.min_x
    }

    pub fn max_x(&self) -> usize {
        self.max_x
    }

    pub fn min_y(&self) -> usize {
        self.min_y
    }

    pub fn max_y(&self) -> usize {
        self.max_y
    }

    /// Raises the western edge to `min_column`, dropping every column below
    /// it. Columns east of the rectangle are unaffected; a cutoff beyond
    /// `max_x` empties the range.
    pub fn with_min_column(self, min_column: Option<usize>) -> Self {
        match min_column {
            Some(column) => Self {
                min_x: self.min_x.max(column),
                ..self
            },
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn count(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }

        (self.max_x - self.min_x + 1) as u64 * (self.max_y - self.min_y + 1) as u64
    }

    /// Iterates the rectangle column by column, rows within a column in
    /// increasing order. This is the walk the fetch loop takes.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> {
        let Self {
            zoom,
            min_x,
            max_x,
            min_y,
            max_y,
        } = *self;

        (min_x..=max_x).flat_map(move |x| (min_y..=max_y).map(move |y| Tile::new(x, y, zoom)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_its_cells() {
        assert_eq!(TileRange::new(3, 1, 2, 4, 6).count(), 6);
        assert_eq!(TileRange::new(0, 0, 0, 0, 0).count(), 1);
    }

    #[test]
    fn iterates_column_by_column() {
        let tiles: Vec<_> = TileRange::new(3, 1, 2, 4, 5)
            .tiles()
            .map(|t| (t.x, t.y))
            .collect();
        assert_eq!(tiles, [(1, 4), (1, 5), (2, 4), (2, 5)]);
    }

    #[test]
    fn column_cutoff_clamps_the_western_edge() {
        let range = TileRange::new(15, 20935, 21208, 12867, 12979);

        let clamped = range.with_min_column(Some(21079));
        assert_eq!(clamped.min_x(), 21079);
        assert_eq!(clamped.max_x(), 21208);
        assert_eq!(clamped.count(), 130 * 113);

        assert_eq!(range.with_min_column(None), range);
        assert_eq!(range.with_min_column(Some(20000)), range);
    }

    #[test]
    fn column_cutoff_past_the_eastern_edge_empties_the_range() {
        let range = TileRange::new(15, 20935, 21208, 12867, 12979).with_min_column(Some(30000));
        assert!(range.is_empty());
        assert_eq!(range.count(), 0);
        assert_eq!(range.tiles().count(), 0);
    }

    #[test]
    #[should_panic]
    fn rejects_inverted_rectangles() {
        TileRange::new(3, 5, 2, 0, 0);
    }

    #[test]
    #[should_panic]
    fn rejects_indices_outside_the_grid() {
        TileRange::new(2, 0, 4, 0, 1);
    }
}
