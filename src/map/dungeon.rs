use glam::IVec2;
use serde::Deserialize;

use super::{check_size, GeneratedMap, Map, MapGenerator, Tile};
use crate::error::{Result, SimError};

/// Axis-aligned room. The carved area includes the far edge, so a room of
/// width 3 spans four columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Whether the whole carved area lies inside a `width` x `height` map.
    pub fn fits(&self, width: i32, height: i32) -> bool {
        let far_x = self.x.checked_add(self.width);
        let far_y = self.y.checked_add(self.height);
        self.x >= 0
            && self.y >= 0
            && self.width >= 0
            && self.height >= 0
            && far_x.is_some_and(|x| x < width)
            && far_y.is_some_and(|y| y < height)
    }

    fn carve(&self, map: &mut Map) {
        for x in self.x..=self.x + self.width {
            for y in self.y..=self.y + self.height {
                map.set(x, y, Tile::Ground);
            }
        }
    }
}

/// Carve a straight run from `from` to `to`. The two points share one axis.
fn carve_corridor(map: &mut Map, from: IVec2, to: IVec2) {
    if from.x == to.x {
        for y in from.y.min(to.y)..=from.y.max(to.y) {
            map.set(from.x, y, Tile::Ground);
        }
    } else {
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            map.set(x, from.y, Tile::Ground);
        }
    }
}

/// Rooms-and-corridors generator over a fixed room list.
///
/// Every room is linked to the one before it (room 0 to the last room) with
/// an L-shaped corridor between centers. One `bool` draw per room decides
/// whether the corridor goes vertical first or horizontal first.
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    rooms: Vec<Room>,
}

impl DungeonGenerator {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }
}

impl MapGenerator for DungeonGenerator {
    fn generate(&self, width: i32, height: i32, rng: &mut fastrand::Rng) -> Result<GeneratedMap> {
        check_size(width, height)?;
        let (first, last) = match (self.rooms.first(), self.rooms.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(SimError::NoRooms),
        };
        if let Some(index) = self.rooms.iter().position(|r| !r.fits(width, height)) {
            return Err(SimError::RoomOutOfBounds { index });
        }

        let mut map = Map::filled(width, height, Tile::Tree);

        for (i, room) in self.rooms.iter().enumerate() {
            room.carve(&mut map);
            let prev = if i > 0 { self.rooms[i - 1] } else { last };

            let a = room.center();
            let b = prev.center();
            if rng.bool() {
                // vertical then horizontal
                let corner = IVec2::new(a.x, b.y);
                carve_corridor(&mut map, a, corner);
                carve_corridor(&mut map, corner, b);
            } else {
                // horizontal then vertical
                let corner = IVec2::new(b.x, a.y);
                carve_corridor(&mut map, a, corner);
                carve_corridor(&mut map, corner, b);
            }
        }

        let spawn_points = self.rooms.iter().skip(1).map(Room::center).collect();
        log::debug!(
            "Dungeon generated: {}x{} with {} rooms",
            width,
            height,
            self.rooms.len()
        );

        Ok(GeneratedMap {
            map,
            player_spawn: first.center(),
            spawn_points,
        })
    }
}
