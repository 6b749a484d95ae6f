//! Tile grid loading and queries.
use std::path::Path;

use glam::Vec2;

use crate::error::WorldError;

/// Immutable grid of tile codes. `0` is open floor, anything else is a wall
/// whose value selects the wall material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldMap {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl WorldMap {
    /// Builds a map from row-major rows. All rows must share one length.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, WorldError> {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if width == 0 {
            return Err(WorldError::Empty);
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, r) in rows.into_iter().enumerate() {
            if r.len() != width {
                return Err(WorldError::Ragged { row, expected: width, found: r.len() });
            }
            cells.extend(r);
        }
        Ok(Self { width, height, cells })
    }

    /// Parses one row per line, one digit per cell. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, WorldError> {
        let mut rows = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let y = rows.len();
            let row = line
                .chars()
                .enumerate()
                .map(|(x, ch)| {
                    ch.to_digit(10)
                        .map(|d| d as u8)
                        .ok_or(WorldError::BadCell { x, y, ch })
                })
                .collect::<Result<Vec<u8>, _>>()?;
            rows.push(row);
        }
        let map = Self::from_rows(rows)?;
        if !map.is_enclosed() {
            log::warn!(
                "map {}x{} is not enclosed by walls; rays may leave the grid",
                map.width,
                map.height
            );
        }
        Ok(map)
    }

    pub fn load(path: &Path) -> Result<Self, WorldError> {
        let text = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at integer cell coordinates, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Whether the cell containing world point `p` is open. Anything off
    /// the grid counts as solid.
    #[inline]
    pub fn is_open_at(&self, p: Vec2) -> bool {
        self.get(p.x.floor() as i32, p.y.floor() as i32) == Some(0)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.width as f32 && p.y < self.height as f32
    }

    /// True when every border cell is a wall.
    pub fn is_enclosed(&self) -> bool {
        let (w, h) = (self.width as i32, self.height as i32);
        let solid = |x, y| self.get(x, y).is_some_and(|c| c != 0);
        (0..w).all(|x| solid(x, 0) && solid(x, h - 1)) && (0..h).all(|y| solid(0, y) && solid(w - 1, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_digit_grid() {
        let map = WorldMap::parse("111\n102\n\n111\n").unwrap();
        assert_eq!((map.width(), map.height()), (3, 3));
        assert_eq!(map.get(1, 1), Some(0));
        assert_eq!(map.get(2, 1), Some(2));
        assert_eq!(map.get(3, 1), None);
        assert_eq!(map.get(-1, 0), None);
        assert!(map.is_enclosed());
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = WorldMap::parse("111\n10\n111").unwrap_err();
        assert!(matches!(err, WorldError::Ragged { row: 1, expected: 3, found: 2 }));
    }

    #[test]
    fn rejects_non_digit_cells() {
        let err = WorldMap::parse("111\n1#1\n111").unwrap_err();
        assert!(matches!(err, WorldError::BadCell { x: 1, y: 1, ch: '#' }));
    }

    #[test]
    fn empty_text_is_an_error() {
        assert!(matches!(WorldMap::parse("\n  \n"), Err(WorldError::Empty)));
    }

    #[test]
    fn open_border_is_reported() {
        let map = WorldMap::parse("101\n101\n111").unwrap();
        assert!(!map.is_enclosed());
    }

    #[test]
    fn off_grid_points_are_solid() {
        let map = WorldMap::parse("000\n000").unwrap();
        assert!(map.is_open_at(Vec2::new(1.5, 1.5)));
        assert!(!map.is_open_at(Vec2::new(-0.1, 1.0)));
        assert!(!map.is_open_at(Vec2::new(3.0, 1.0)));
    }
}
