pub mod collision;
pub mod events;
pub mod input;
pub mod inspect;
pub mod movement;
pub mod reaction;
pub mod steering;
pub mod visibility;

use crate::map::Map;
use inspect::Inspection;
use input::TickInput;
use reaction::ReactionRules;
use steering::SteeringClock;

/// Per-run settings the tick needs beyond the world itself.
#[derive(Debug, Clone, Copy)]
pub struct TickRules {
    pub circular_fov: bool,
    pub reactions: ReactionRules,
}

/// What happened during one tick, for the host to log or display.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub collisions: usize,
    pub animals_fled: usize,
    pub inspection: Option<Inspection>,
}

/// Run all simulation systems for one fixed tick.
pub fn tick(
    world: &mut hecs::World,
    map: &Map,
    dt: f32,
    input: &TickInput,
    steering_clock: &mut SteeringClock,
    rules: &TickRules,
) -> TickReport {
    // 1. Host intents (keyboard / mouse snapshot)
    input::apply(world, input);

    // 2. Animal steering, on its own slower clock
    if steering_clock.advance(dt) {
        steering::update(world);
    }

    // 3. Movement resolution
    let bumps = movement::update(world, map);

    // 4. Collision markers
    collision::apply(world, &bumps);

    // 5. Scare + aggression reactions
    let animals_fled = reaction::update(world, &rules.reactions);

    // 6. Field of view for whoever moved or spawned
    visibility::update(world, map, rules.circular_fov);

    // 7. World clicks
    let inspection = inspect::update(world);

    // 8. Transient markers never outlive the tick
    events::clear(world);

    TickReport {
        collisions: bumps.len(),
        animals_fled,
        inspection,
    }
}
