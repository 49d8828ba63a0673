use glam::IVec2;

use crate::ecs::components::{ClickedOnWorld, Direction, Player, Position, WantsToMove};

/// Intents gathered by the host for one tick. Replaces any global
/// keyboard/mouse state: the host fills this in and hands it to the tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub movement: Option<Direction>,
    /// World cell the user clicked, already unprojected.
    pub click: Option<IVec2>,
}

impl TickInput {
    pub fn moving(direction: Direction) -> Self {
        Self {
            movement: Some(direction),
            click: None,
        }
    }

    pub fn clicking(at: IVec2) -> Self {
        Self {
            movement: None,
            click: Some(at),
        }
    }
}

/// Hand the tick's intents to every player entity.
pub fn apply(world: &mut hecs::World, input: &TickInput) {
    if input.movement.is_none() && input.click.is_none() {
        return;
    }

    let players: Vec<(hecs::Entity, bool)> = world
        .query::<Option<&Position>>()
        .with::<&Player>()
        .iter()
        .map(|(entity, pos)| (entity, pos.is_some()))
        .collect();

    for (entity, has_position) in players {
        if let (Some(dir), true) = (input.movement, has_position) {
            let _ = world.insert_one(entity, WantsToMove(dir));
        }
        if let Some(at) = input.click {
            let _ = world.insert_one(entity, ClickedOnWorld(at));
        }
    }
}
