use super::{check_size, GeneratedMap, Map, MapGenerator, Tile};
use crate::error::{Result, SimError};

/// Share of cells that receive a random tree drop.
const TREE_DENSITY: f32 = 0.3;

/// Open field fenced by trees, with trees thrown at random inside.
///
/// No connectivity guarantee: the player spawn is any ground cell and the
/// remaining ground cells become spawn points.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterGenerator;

impl MapGenerator for ScatterGenerator {
    fn generate(&self, width: i32, height: i32, rng: &mut fastrand::Rng) -> Result<GeneratedMap> {
        check_size(width, height)?;
        let mut map = Map::filled(width, height, Tile::Ground);

        // fence
        for x in 0..width {
            map.set(x, 0, Tile::Tree);
            map.set(x, height - 1, Tile::Tree);
        }
        for y in 0..height {
            map.set(0, y, Tile::Tree);
            map.set(width - 1, y, Tile::Tree);
        }

        let drops = (width as f32 * height as f32 * TREE_DENSITY) as usize;
        for _ in 0..drops {
            let x = rng.i32(0..width);
            let y = rng.i32(0..height);
            map.set(x, y, Tile::Tree);
        }

        let mut ground: Vec<_> = map
            .cells()
            .filter(|(_, tile)| *tile == Tile::Ground)
            .map(|(p, _)| p)
            .collect();
        if ground.is_empty() {
            return Err(SimError::NoWalkableSpawn);
        }
        let player_spawn = ground.remove(rng.usize(0..ground.len()));

        Ok(GeneratedMap {
            map,
            player_spawn,
            spawn_points: ground,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_is_fenced() {
        let out = ScatterGenerator
            .generate(12, 9, &mut fastrand::Rng::with_seed(5))
            .unwrap();
        for x in 0..12 {
            assert!(!out.map.is_walkable(x, 0));
            assert!(!out.map.is_walkable(x, 8));
        }
        for y in 0..9 {
            assert!(!out.map.is_walkable(0, y));
            assert!(!out.map.is_walkable(11, y));
        }
    }

    #[test]
    fn spawns_are_walkable_and_distinct() {
        let out = ScatterGenerator
            .generate(16, 16, &mut fastrand::Rng::with_seed(11))
            .unwrap();
        assert!(out.map.is_walkable_at(out.player_spawn));
        assert!(!out.spawn_points.contains(&out.player_spawn));
        assert!(out.spawn_points.iter().all(|p| out.map.is_walkable_at(*p)));
    }

    #[test]
    fn tiny_map_has_no_spawn() {
        let err = ScatterGenerator
            .generate(2, 2, &mut fastrand::Rng::with_seed(0))
            .unwrap_err();
        assert!(matches!(err, SimError::NoWalkableSpawn));
    }
}
