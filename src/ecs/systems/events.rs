use crate::ecs::components::{ClickedOnWorld, Collided, Moved, Spawned, WantsToMove};

/// Strip every transient marker from every entity. Runs last in each tick,
/// whether or not anything consumed the markers.
pub fn clear(world: &mut hecs::World) {
    clear_marker::<Moved>(world);
    clear_marker::<Spawned>(world);
    clear_marker::<Collided>(world);
    clear_marker::<ClickedOnWorld>(world);
    clear_marker::<WantsToMove>(world);
}

fn clear_marker<T: hecs::Component>(world: &mut hecs::World) {
    let tagged: Vec<hecs::Entity> = world
        .query::<()>()
        .with::<&T>()
        .iter()
        .map(|(entity, ())| entity)
        .collect();
    for entity in tagged {
        let _ = world.remove_one::<T>(entity);
    }
}
