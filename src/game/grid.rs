//! Tile grid written by the engine and read by the renderer

/// What a single grid cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Apple,
    SnakeHead,
    SnakeBody,
}

/// Anything the engine can rasterize a frame into
pub trait TileSink {
    /// Reset every cell to `Tile::Empty`
    fn clear(&mut self);

    /// Set the tile at (x, y). Out-of-range cells are ignored.
    fn set_tile(&mut self, tile: Tile, x: i32, y: i32);
}

/// Fixed-size, row-major tile grid
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Tile at (x, y), or `None` when outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Iterate one row, left to right
    pub fn row(&self, y: usize) -> &[Tile] {
        &self.tiles[y * self.width..(y + 1) * self.width]
    }
}

impl TileSink for TileGrid {
    fn clear(&mut self) {
        self.tiles.fill(Tile::Empty);
    }

    fn set_tile(&mut self, tile: Tile, x: i32, y: i32) {
        match self.index(x, y) {
            Some(i) => self.tiles[i] = tile,
            None => log::warn!("tile ({}, {}) outside {}x{} grid", x, y, self.width, self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = TileGrid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert!(grid.row(2).iter().all(|t| *t == Tile::Empty));
    }

    #[test]
    fn test_set_and_clear() {
        let mut grid = TileGrid::new(4, 3);
        grid.set_tile(Tile::Apple, 3, 2);
        grid.set_tile(Tile::Wall, 0, 0);
        assert_eq!(grid.get(3, 2), Some(Tile::Apple));
        assert_eq!(grid.row(0)[0], Tile::Wall);

        grid.clear();
        assert_eq!(grid.get(3, 2), Some(Tile::Empty));
        assert_eq!(grid.get(0, 0), Some(Tile::Empty));
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut grid = TileGrid::new(4, 3);
        grid.set_tile(Tile::Apple, 4, 0);
        grid.set_tile(Tile::Apple, -1, 0);
        assert_eq!(grid.get(4, 0), None);
        assert!(grid.row(0).iter().all(|t| *t == Tile::Empty));
    }
}
