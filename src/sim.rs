use crate::animal;
use crate::config::{GeneratorKind, SimConfig};
use crate::ecs::components::Player;
use crate::ecs::systems::{self, input::TickInput, reaction::ReactionRules};
use crate::ecs::systems::steering::SteeringClock;
use crate::ecs::systems::{TickReport, TickRules};
use crate::error::Result;
use crate::map::{DungeonGenerator, Map, MapGenerator, ScatterGenerator};

/// Owns the world, the map and everything a tick needs.
pub struct Simulation {
    world: hecs::World,
    map: Map,
    player: hecs::Entity,
    rng: fastrand::Rng,
    steering_clock: SteeringClock,
    rules: TickRules,
    tick_count: u64,
}

impl Simulation {
    /// Validate `config`, generate the map and populate the world.
    pub fn new(config: &SimConfig, mut rng: fastrand::Rng) -> Result<Self> {
        config.validate()?;

        let generated = match config.generator {
            GeneratorKind::Dungeon => DungeonGenerator::new(config.rooms.clone()).generate(
                config.map_width,
                config.map_height,
                &mut rng,
            )?,
            GeneratorKind::Scatter => {
                ScatterGenerator.generate(config.map_width, config.map_height, &mut rng)?
            }
        };

        let mut world = hecs::World::new();
        let player = animal::populate(
            &mut world,
            &generated,
            config.animal_count,
            config.fov_radius,
            config.player_health,
            &mut rng,
        );

        Ok(Self {
            world,
            map: generated.map,
            player,
            rng,
            steering_clock: SteeringClock::new(config.steering_interval),
            rules: TickRules {
                circular_fov: config.circular_fov,
                reactions: ReactionRules {
                    scare_increment: config.scare_increment,
                    scare_threshold: config.scare_threshold,
                    attack_damage: config.attack_damage,
                },
            },
            tick_count: 0,
        })
    }

    /// Advance one fixed tick.
    pub fn tick(&mut self, dt: f32, input: &TickInput) -> TickReport {
        let report = systems::tick(
            &mut self.world,
            &self.map,
            dt,
            input,
            &mut self.steering_clock,
            &self.rules,
        );
        self.tick_count += 1;
        if report.animals_fled > 0 || report.collisions > 0 {
            log::debug!(
                "tick {}: {} collisions, {} animals fled",
                self.tick_count,
                report.collisions,
                report.animals_fled
            );
        }
        report
    }

    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    /// Mutable world access for hosts and tests that stage entities.
    pub fn world_mut(&mut self) -> &mut hecs::World {
        &mut self.world
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> hecs::Entity {
        self.player
    }

    /// Whether the starting player is still in the world.
    pub fn has_player(&self) -> bool {
        self.world
            .entity(self.player)
            .map(|e| e.has::<Player>())
            .unwrap_or(false)
    }

    pub fn rng(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::ecs::components::{
        Aggressive, Animal, Collided, Direction, FieldOfView, Moved, Position, Spawned,
    };

    fn seeded(seed: u64) -> Simulation {
        Simulation::new(&SimConfig::default(), fastrand::Rng::with_seed(seed)).unwrap()
    }

    fn player_pos(sim: &Simulation) -> IVec2 {
        sim.world().get::<&Position>(sim.player()).unwrap().0
    }

    #[test]
    fn reference_world_layout() {
        let sim = seeded(17);
        assert_eq!(player_pos(&sim), IVec2::new(3, 2));
        let animals = sim.world().query::<&Animal>().iter().count();
        // four rooms, first one is the player's
        assert_eq!(animals, 3);
        assert!(sim.world().get::<&Spawned>(sim.player()).is_ok());
    }

    #[test]
    fn same_seed_same_world() {
        let a = seeded(99);
        let b = seeded(99);
        assert_eq!(a.map(), b.map());
        let kinds = |sim: &Simulation| {
            let mut v: Vec<(i32, i32, bool)> = sim
                .world()
                .query::<(&Position, Option<&Aggressive>)>()
                .with::<&Animal>()
                .iter()
                .map(|(_, (p, aggro))| (p.0.x, p.0.y, aggro.is_some()))
                .collect();
            v.sort();
            v
        };
        assert_eq!(kinds(&a), kinds(&b));
    }

    #[test]
    fn first_tick_sees_spawns_then_clears_them() {
        let mut sim = seeded(3);
        sim.tick(1.0 / 60.0, &TickInput::default());

        let fov = sim.world().get::<&FieldOfView>(sim.player()).unwrap();
        assert!(fov.can_see(IVec2::new(3, 2)));
        assert!(fov.revealed.is_superset(&fov.visible));
        drop(fov);

        assert_eq!(sim.world().query::<&Spawned>().iter().count(), 0);
    }

    #[test]
    fn move_right_then_marker_cleared() {
        let mut sim = seeded(5);
        let start = player_pos(&sim);
        assert!(sim.map().is_walkable(start.x + 1, start.y));

        let player = sim.player();
        let map = sim.map().clone();
        let outcome = systems::movement::resolve_move(sim.world_mut(), &map, player, Direction::Right);

        assert!(outcome.applied());
        assert_eq!(player_pos(&sim), start + IVec2::X);
        assert!(sim.world().get::<&Moved>(player).is_ok());

        systems::events::clear(sim.world_mut());
        assert!(sim.world().get::<&Moved>(player).is_err());
    }

    #[test]
    fn markers_never_survive_a_tick() {
        let mut sim = seeded(8);
        let player = sim.player();
        sim.world_mut().insert_one(player, Collided { other: player }).unwrap();

        sim.tick(1.0 / 60.0, &TickInput::clicking(IVec2::new(3, 2)));

        let e = sim.world().entity(player).unwrap();
        assert!(!e.has::<Collided>());
        assert!(!e.has::<Moved>());
        assert!(!e.has::<Spawned>());
        assert!(!e.has::<crate::ecs::components::ClickedOnWorld>());
    }

    #[test]
    fn click_on_self_is_inspected() {
        let mut sim = seeded(8);
        let at = player_pos(&sim);
        let report = sim.tick(1.0 / 60.0, &TickInput::clicking(at));
        assert_eq!(report.inspection.map(|i| i.name), Some("Jack".to_string()));
    }

    #[test]
    fn walking_into_a_wolf_twice_scares_it_off() {
        let mut sim = seeded(21);
        let start = player_pos(&sim);
        assert_eq!(sim.rules.reactions.scare_increment, 0.5);

        // Stage a wolf right next to the player.
        let wolf_at = start + IVec2::X;
        let wolf = animal::spawn_animal(sim.world_mut(), animal::AnimalKind::Wolf, wolf_at, 5);

        sim.tick(0.0, &TickInput::moving(Direction::Right));
        assert!(sim.world().contains(wolf));
        assert_eq!(player_pos(&sim), start);

        let report = sim.tick(0.0, &TickInput::moving(Direction::Right));
        assert_eq!(report.animals_fled, 1);
        assert!(!sim.world().contains(wolf));
    }
}
