use glam::IVec2;

use crate::ecs::components::*;
use crate::map::GeneratedMap;

/// The animal species the world builder can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalKind {
    Fox,
    Bunny,
    Wolf,
}

impl AnimalKind {
    pub const ALL: [AnimalKind; 3] = [AnimalKind::Fox, AnimalKind::Bunny, AnimalKind::Wolf];

    pub fn label(self) -> &'static str {
        match self {
            AnimalKind::Fox => "Fox",
            AnimalKind::Bunny => "Bunny",
            AnimalKind::Wolf => "Wolf",
        }
    }

    fn color(self) -> u32 {
        let [r, g, b] = match self {
            AnimalKind::Fox => [165, 90, 40],    // brown
            AnimalKind::Bunny => [240, 220, 60], // yellow
            AnimalKind::Wolf => [110, 110, 120], // gray
        };
        (r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | 0xFF
    }

    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(0..Self::ALL.len())]
    }
}

const PLAYER_COLOR: u32 = 0xE0_30_30_FF;

/// Spawn the farmer.
pub fn spawn_player(world: &mut hecs::World, at: IVec2, fov_radius: i32, health: i32) -> hecs::Entity {
    world.spawn((
        Name("Jack".to_string()),
        Position(at),
        Size::UNIT,
        Shape {
            kind: ShapeKind::Circle,
            color: PLAYER_COLOR,
        },
        Player,
        FieldOfView::new(fov_radius),
        Spawned,
        Health::new(health),
        Diary::default(),
        CanScareAggressiveAnimals,
    ))
}

/// Spawn one animal of `kind` with its disposition tag.
pub fn spawn_animal(
    world: &mut hecs::World,
    kind: AnimalKind,
    at: IVec2,
    fov_radius: i32,
) -> hecs::Entity {
    let mut builder = hecs::EntityBuilder::new();
    builder.add_bundle((
        Name(kind.label().to_string()),
        Position(at),
        Size::UNIT,
        Shape {
            kind: ShapeKind::Circle,
            color: kind.color(),
        },
        FieldOfView::new(fov_radius),
        Animal,
        Spawned,
    ));
    match kind {
        AnimalKind::Fox => builder.add(Curious),
        AnimalKind::Bunny => builder.add(Timid),
        AnimalKind::Wolf => builder.add(Aggressive),
    };
    world.spawn(builder.build())
}

/// Place up to `count` random animals on distinct spawn points, each drawn
/// from the remaining points at a random index. Returns how many spawned.
pub fn spawn_animals(
    world: &mut hecs::World,
    spawn_points: &[IVec2],
    count: usize,
    fov_radius: i32,
    rng: &mut fastrand::Rng,
) -> usize {
    let mut free = spawn_points.to_vec();
    let mut spawned = 0;
    for _ in 0..count {
        if free.is_empty() {
            break;
        }
        let at = free.remove(rng.usize(0..free.len()));
        let kind = AnimalKind::random(rng);
        spawn_animal(world, kind, at, fov_radius);
        log::debug!("Spawned {} at {}", kind.label(), at);
        spawned += 1;
    }
    spawned
}

/// Populate an empty world from a generated map. Returns the player.
pub fn populate(
    world: &mut hecs::World,
    generated: &GeneratedMap,
    animal_count: usize,
    fov_radius: i32,
    player_health: i32,
    rng: &mut fastrand::Rng,
) -> hecs::Entity {
    let player = spawn_player(world, generated.player_spawn, fov_radius, player_health);
    let animals = spawn_animals(world, &generated.spawn_points, animal_count, fov_radius, rng);
    log::info!(
        "World populated: player at {}, {} animals",
        generated.player_spawn,
        animals
    );
    player
}
