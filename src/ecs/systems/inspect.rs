use glam::IVec2;

use crate::ecs::components::{ClickedOnWorld, Diary, Name, Position};

/// What the UI should label after a world click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub name: String,
    pub at: IVec2,
}

/// Log world clicks to the clicker's diary and look up who stands on the
/// clicked cell.
pub fn update(world: &mut hecs::World) -> Option<Inspection> {
    let clicks: Vec<(hecs::Entity, IVec2)> = world
        .query::<&ClickedOnWorld>()
        .iter()
        .map(|(entity, click)| (entity, click.0))
        .collect();

    let mut found = None;
    for (entity, at) in clicks {
        if let Ok(mut diary) = world.get::<&mut Diary>(entity) {
            diary.push(format!("Clicked on world at ({}, {})", at.x, at.y));
        }
        let hit = world
            .query::<(&Position, &Name)>()
            .iter()
            .find(|(_, (pos, _))| pos.0 == at)
            .map(|(_, (_, name))| name.0.clone());
        if let Some(name) = hit {
            found = Some(Inspection { name, at });
        }
    }
    found
}
