//! Tile-map interface consumed by planning and movement, plus the in-memory grid
//! used by the tools and tests.
//! Map generation and presentation live outside this crate; agents only read
//! adjacency, walkability, and the tile-to-world mapping.

use std::cell::Cell;

use crate::error::GridError;
use crate::types::{Pos, TileKind, Vec3};

/// Read-only view of a tile map shared by every agent on it.
pub trait GridMap {
    /// `(width, height)` in tiles.
    fn dimensions(&self) -> (usize, usize);

    /// Tile kind at `pos`, or `None` outside the map.
    fn tile_at(&self, pos: Pos) -> Option<TileKind>;

    /// World-space centre of the tile at `pos`.
    fn world_position(&self, pos: Pos) -> Vec3;

    /// Whether the map may currently be read. Agents skip ticks while this is false.
    fn is_alive(&self) -> bool {
        true
    }

    fn in_bounds(&self, pos: Pos) -> bool {
        let (width, height) = self.dimensions();
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
    }

    fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos) == Some(TileKind::Floor)
    }

    /// Orthogonal in-bounds neighbours in north, east, south, west order.
    fn neighbors(&self, pos: Pos) -> Vec<Pos> {
        [
            Pos { y: pos.y - 1, x: pos.x },
            Pos { y: pos.y, x: pos.x + 1 },
            Pos { y: pos.y + 1, x: pos.x },
            Pos { y: pos.y, x: pos.x - 1 },
        ]
        .into_iter()
        .filter(|next| self.in_bounds(*next))
        .collect()
    }

    /// Every tile in row-major order.
    fn all_tiles(&self) -> Vec<Pos> {
        let (width, height) = self.dimensions();
        (0..height)
            .flat_map(|y| (0..width).map(move |x| Pos { y: y as i32, x: x as i32 }))
            .collect()
    }

    /// Row-major index of an in-bounds `pos`.
    fn index(&self, pos: Pos) -> usize {
        let (width, _) = self.dimensions();
        (pos.y as usize) * width + (pos.x as usize)
    }
}

pub(crate) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Dense rectangular grid. `#` is a wall and `.` is floor in the row format.
#[derive(Clone, Debug)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
    tile_size: f32,
    alive: Cell<bool>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize, fill: TileKind) -> Self {
        Self { width, height, tiles: vec![fill; width * height], tile_size: 1.0, alive: Cell::new(true) }
    }

    /// Fully walkable `width` x `height` grid.
    pub fn open(width: usize, height: usize) -> Self {
        Self::new(width, height, TileKind::Floor)
    }

    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let actual = line.chars().count();
            if actual != width {
                return Err(GridError::RaggedRow { row, expected: width, actual });
            }
            for (column, glyph) in line.chars().enumerate() {
                let kind = match glyph {
                    '#' => TileKind::Wall,
                    '.' => TileKind::Floor,
                    _ => return Err(GridError::UnknownGlyph { glyph, row, column }),
                };
                tiles.push(kind);
            }
        }

        Ok(Self { width, height: rows.len(), tiles, tile_size: 1.0, alive: Cell::new(true) })
    }

    pub fn with_tile_size(mut self, tile_size: f32) -> Result<Self, GridError> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(GridError::InvalidTileSize(tile_size));
        }
        self.tile_size = tile_size;
        Ok(self)
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    /// Marks the map as torn down. Agents sharing it suspend until [`TileGrid::restore`].
    pub fn destroy(&self) {
        self.alive.set(false);
    }

    pub fn restore(&self) {
        self.alive.set(true);
    }

    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|tile| **tile == TileKind::Floor).count()
    }
}

impl GridMap for TileGrid {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn tile_at(&self, pos: Pos) -> Option<TileKind> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.tiles[self.index(pos)])
    }

    fn world_position(&self, pos: Pos) -> Vec3 {
        Vec3::new(pos.x as f32 * self.tile_size, 0.0, pos.y as f32 * self.tile_size)
    }

    fn is_alive(&self) -> bool {
        self.alive.get()
    }
}
