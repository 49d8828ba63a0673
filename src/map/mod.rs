pub mod dungeon;
pub mod scatter;

use glam::IVec2;

use crate::error::{Result, SimError};

pub use dungeon::{DungeonGenerator, Room};
pub use scatter::ScatterGenerator;

/// Largest accepted map side. Keeps cell counts and radius arithmetic well
/// inside `i32`.
pub const MAX_MAP_SIDE: i32 = 4096;

/// Reject maps that are empty or larger than `MAX_MAP_SIDE` on either axis.
pub fn check_size(width: i32, height: i32) -> Result<()> {
    if width <= 0 || height <= 0 {
        return Err(SimError::EmptyMap { width, height });
    }
    if width > MAX_MAP_SIDE || height > MAX_MAP_SIDE {
        return Err(SimError::MapTooLarge {
            width,
            height,
            max: MAX_MAP_SIDE,
        });
    }
    Ok(())
}

/// Terrain kind of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Ground,
    /// Blocks movement and line of sight.
    Tree,
}

impl Tile {
    pub fn blocks(self) -> bool {
        matches!(self, Tile::Tree)
    }
}

/// Fixed-size tile grid with origin (0, 0).
///
/// Row-major storage. Only generators write to it; once handed to the
/// simulation it is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Map {
    /// A `width` x `height` grid with every cell set to `fill`.
    /// Callers guarantee the size passed `check_size`.
    pub fn filled(width: i32, height: i32, fill: Tile) -> Self {
        debug_assert!(check_size(width, height).is_ok(), "bad map size {width}x{height}");
        Self {
            width,
            height,
            tiles: vec![fill; (width.max(0) * height.max(0)) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Tile at (x, y), or `None` outside the grid.
    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        if self.in_bounds(x, y) {
            Some(self.tiles[self.index(x, y)])
        } else {
            None
        }
    }

    /// True iff (x, y) is inside the grid and is ground. No wraparound.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) == Some(Tile::Ground)
    }

    pub fn is_walkable_at(&self, p: IVec2) -> bool {
        self.is_walkable(p.x, p.y)
    }

    /// Iterate every cell as `(position, tile)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.tiles.iter().enumerate().map(move |(i, &tile)| {
            let i = i as i32;
            (IVec2::new(i % self.width, i / self.width), tile)
        })
    }

    pub(crate) fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.tiles[idx] = tile;
        }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }
}

/// Output of a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMap {
    pub map: Map,
    pub player_spawn: IVec2,
    /// Candidate animal spawn cells, in generator order.
    pub spawn_points: Vec<IVec2>,
}

/// Builds a tile grid plus a spawn layout from an explicit random source.
pub trait MapGenerator {
    fn generate(&self, width: i32, height: i32, rng: &mut fastrand::Rng) -> Result<GeneratedMap>;
}
