use crate::ecs::components::Collided;
use crate::ecs::systems::movement::Bump;

/// Turn rejected-by-entity moves into `Collided` markers on both sides.
/// An entity keeps the first collision it gets in a tick.
pub fn apply(world: &mut hecs::World, bumps: &[Bump]) {
    for &(mover, obstacle) in bumps {
        mark(world, mover, obstacle);
        mark(world, obstacle, mover);
    }
}

fn mark(world: &mut hecs::World, entity: hecs::Entity, other: hecs::Entity) {
    let already = world
        .entity(entity)
        .map(|e| e.has::<Collided>())
        .unwrap_or(true);
    if !already {
        let _ = world.insert_one(entity, Collided { other });
    }
}
