use glam::IVec2;

use crate::ecs::components::{Direction, Moved, Position, Size, WantsToMove};
use crate::map::Map;

/// Result of one move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied,
    /// Destination tile is out of bounds or not ground.
    BlockedByTerrain,
    /// Footprint would overlap this entity.
    BlockedBy(hecs::Entity),
}

impl MoveOutcome {
    pub fn applied(self) -> bool {
        self == MoveOutcome::Applied
    }
}

/// A pair of entities that bumped into each other: `(mover, obstacle)`.
pub type Bump = (hecs::Entity, hecs::Entity);

/// Consume every `WantsToMove` intent and try to apply it.
/// Returns the moves that were stopped by another entity.
pub fn update(world: &mut hecs::World, map: &Map) -> Vec<Bump> {
    let intents: Vec<(hecs::Entity, Direction)> = world
        .query::<&WantsToMove>()
        .iter()
        .map(|(entity, intent)| (entity, intent.0))
        .collect();

    let mut bumps = Vec::new();
    for (entity, direction) in intents {
        if let MoveOutcome::BlockedBy(other) = resolve_move(world, map, entity, direction) {
            bumps.push((entity, other));
        }
    }
    bumps
}

/// Move `entity` one cell in `direction` if the tile is walkable and its
/// footprint would not overlap any other sized entity.
///
/// Always removes the entity's `WantsToMove`. Attaches `Moved` on success.
///
/// # Panics
///
/// If `entity` lacks `Position` or `Size`.
pub fn resolve_move(
    world: &mut hecs::World,
    map: &Map,
    entity: hecs::Entity,
    direction: Direction,
) -> MoveOutcome {
    let _ = world.remove_one::<WantsToMove>(entity);

    let pos = match world.get::<&Position>(entity) {
        Ok(pos) => pos.0,
        Err(e) => panic!("resolve_move: {entity:?} has no Position ({e})"),
    };
    let size = match world.get::<&Size>(entity) {
        Ok(size) => *size,
        Err(e) => panic!("resolve_move: {entity:?} has no Size ({e})"),
    };

    let target = pos + direction.delta();
    if !map.is_walkable_at(target) {
        log::trace!("{entity:?} blocked by terrain at {target}");
        return MoveOutcome::BlockedByTerrain;
    }

    let blocker = world
        .query::<(&Position, &Size)>()
        .iter()
        .find(|(other, (other_pos, other_size))| {
            *other != entity && overlaps(target, size, other_pos.0, **other_size)
        })
        .map(|(other, _)| other);
    if let Some(other) = blocker {
        log::trace!("{entity:?} bumped into {other:?} at {target}");
        return MoveOutcome::BlockedBy(other);
    }

    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        pos.0 = target;
    }
    let _ = world.insert_one(entity, Moved);
    MoveOutcome::Applied
}

/// Strict AABB overlap of two centered footprints. Edges that only touch do
/// not overlap. Works in doubled coordinates to stay in integers.
fn overlaps(a: IVec2, a_size: Size, b: IVec2, b_size: Size) -> bool {
    let (a_min, a_max) = extent(a, a_size);
    let (b_min, b_max) = extent(b, b_size);
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

fn extent(center: IVec2, size: Size) -> (IVec2, IVec2) {
    let c2 = center * 2;
    let half = IVec2::new(size.width, size.height);
    (c2 - half, c2 + half)
}
