use crate::ecs::components::{
    Aggressive, Animal, CanScareAggressiveAnimals, Collided, Diary, Health, Name, Scared,
};

/// Tuning for collision reactions.
#[derive(Debug, Clone, Copy)]
pub struct ReactionRules {
    pub scare_increment: f32,
    pub scare_threshold: f32,
    pub attack_damage: i32,
}

/// Resolve this tick's collisions: scares first, then attacks.
///
/// Animals frightened away are despawned once the scare pass is done, so
/// they neither corrupt that iteration nor attack on their way out.
/// Returns how many animals left.
pub fn update(world: &mut hecs::World, rules: &ReactionRules) -> usize {
    let fled = scare(world, rules);
    let count = fled.len();
    for entity in fled {
        let _ = world.despawn(entity);
    }
    attack(world, rules.attack_damage);
    count
}

/// Raise fear on aggressive animals bumped by a scarer. Returns the animals
/// whose fear reached the threshold; the caller removes them.
fn scare(world: &mut hecs::World, rules: &ReactionRules) -> Vec<hecs::Entity> {
    let pairs: Vec<(hecs::Entity, hecs::Entity)> = world
        .query::<&Collided>()
        .with::<&CanScareAggressiveAnimals>()
        .iter()
        .map(|(scarer, hit)| (scarer, hit.other))
        .collect();

    let mut fled = Vec::new();
    for (scarer, other) in pairs {
        let target_ok = world
            .entity(other)
            .map(|e| e.has::<Animal>() && e.has::<Aggressive>())
            .unwrap_or(false);
        if !target_ok || fled.contains(&other) {
            continue;
        }

        let factor = match world.query_one_mut::<&mut Scared>(other) {
            Ok(scared) => {
                scared.factor += rules.scare_increment;
                scared.factor
            }
            Err(_) => {
                let _ = world.insert_one(
                    other,
                    Scared {
                        factor: rules.scare_increment,
                    },
                );
                rules.scare_increment
            }
        };

        let scarer_name = name_of(world, scarer);
        let other_name = name_of(world, other);
        log::debug!(
            "{scarer_name} tries to scare {other_name}: {factor:.1}/{:.1}",
            rules.scare_threshold
        );

        if factor >= rules.scare_threshold {
            log::info!("{scarer_name} scared {other_name} away");
            if let Ok(mut diary) = world.get::<&mut Diary>(scarer) {
                diary.push(format!("{scarer_name} scared {other_name} away!"));
            }
            fled.push(other);
        }
    }
    fled
}

/// Aggressive animals damage whatever health-bearing entity they bumped.
fn attack(world: &mut hecs::World, damage: i32) {
    let pairs: Vec<(hecs::Entity, hecs::Entity)> = world
        .query::<&Collided>()
        .with::<(&Animal, &Aggressive)>()
        .iter()
        .map(|(attacker, hit)| (attacker, hit.other))
        .collect();

    for (attacker, victim) in pairs {
        match world.get::<&mut Health>(victim) {
            Ok(mut health) => health.current = health.current.saturating_sub(damage),
            Err(_) => continue,
        }

        let msg = format!(
            "{} attacks {} for {} damage",
            name_of(world, attacker),
            name_of(world, victim),
            damage
        );
        log::debug!("{msg}");
        for who in [attacker, victim] {
            if let Ok(mut diary) = world.get::<&mut Diary>(who) {
                diary.push(msg.clone());
            }
        }
    }
}

pub(crate) fn name_of(world: &hecs::World, entity: hecs::Entity) -> String {
    world
        .get::<&Name>(entity)
        .map(|n| n.0.clone())
        .unwrap_or_else(|_| "<Unnamed>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: ReactionRules = ReactionRules {
        scare_increment: 0.5,
        scare_threshold: 1.0,
        attack_damage: 1,
    };

    fn farmer(world: &mut hecs::World) -> hecs::Entity {
        world.spawn((
            Name("Jack".into()),
            Health::new(10),
            Diary::default(),
            CanScareAggressiveAnimals,
        ))
    }

    fn wolf(world: &mut hecs::World) -> hecs::Entity {
        world.spawn((Name("Wolf".into()), Animal, Aggressive, Diary::default()))
    }

    fn collide(world: &mut hecs::World, a: hecs::Entity, b: hecs::Entity) {
        world.insert_one(a, Collided { other: b }).unwrap();
        world.insert_one(b, Collided { other: a }).unwrap();
    }

    fn clear_collisions(world: &mut hecs::World, entities: &[hecs::Entity]) {
        for &e in entities {
            let _ = world.remove_one::<Collided>(e);
        }
    }

    #[test]
    fn wolf_bite_costs_one_health_and_is_logged_on_both_sides() {
        let mut world = hecs::World::new();
        let jack = world.spawn((Name("Jack".into()), Health::new(10), Diary::default()));
        let w = wolf(&mut world);
        collide(&mut world, jack, w);

        update(&mut world, &RULES);

        assert_eq!(world.get::<&Health>(jack).unwrap().current, 9);
        let expected = "Wolf attacks Jack for 1 damage";
        assert_eq!(world.get::<&Diary>(jack).unwrap().messages(), [expected]);
        assert_eq!(world.get::<&Diary>(w).unwrap().messages(), [expected]);
    }

    #[test]
    fn health_goes_negative() {
        let mut world = hecs::World::new();
        let jack = world.spawn((Health { current: 0, max: 10 },));
        let w = wolf(&mut world);
        collide(&mut world, jack, w);

        update(&mut world, &RULES);

        assert_eq!(world.get::<&Health>(jack).unwrap().current, -1);
    }

    #[test]
    fn huge_damage_saturates_instead_of_wrapping() {
        let mut world = hecs::World::new();
        let jack = world.spawn((Health { current: i32::MIN + 1, max: 10 },));
        let w = wolf(&mut world);
        collide(&mut world, jack, w);

        update(
            &mut world,
            &ReactionRules {
                attack_damage: i32::MAX,
                ..RULES
            },
        );

        assert_eq!(world.get::<&Health>(jack).unwrap().current, i32::MIN);
    }

    #[test]
    fn non_aggressive_animals_do_not_attack() {
        let mut world = hecs::World::new();
        let jack = world.spawn((Health::new(10),));
        let bunny = world.spawn((Animal,));
        collide(&mut world, jack, bunny);

        update(&mut world, &RULES);

        assert_eq!(world.get::<&Health>(jack).unwrap().current, 10);
    }

    #[test]
    fn two_scares_send_the_wolf_away() {
        let mut world = hecs::World::new();
        let jack = farmer(&mut world);
        let w = wolf(&mut world);

        collide(&mut world, jack, w);
        assert_eq!(update(&mut world, &RULES), 0);
        assert_eq!(world.get::<&Scared>(w).unwrap().factor, 0.5);
        assert!(world.contains(w));
        // still bit back on the first contact
        assert_eq!(world.get::<&Health>(jack).unwrap().current, 9);

        clear_collisions(&mut world, &[jack, w]);
        collide(&mut world, jack, w);
        assert_eq!(update(&mut world, &RULES), 1);
        assert!(!world.contains(w));
        // gone before the attack pass
        assert_eq!(world.get::<&Health>(jack).unwrap().current, 9);
        assert_eq!(
            world.get::<&Diary>(jack).unwrap().recent(1).next(),
            Some("Jack scared Wolf away!")
        );
    }

    #[test]
    fn scarer_ignores_timid_animals() {
        let mut world = hecs::World::new();
        let jack = farmer(&mut world);
        let bunny = world.spawn((Animal,));
        collide(&mut world, jack, bunny);

        update(&mut world, &RULES);

        assert!(world.get::<&Scared>(bunny).is_err());
        assert!(world.contains(bunny));
    }

    #[test]
    fn unnamed_entities_get_placeholder() {
        let mut world = hecs::World::new();
        let e = world.spawn(());
        assert_eq!(name_of(&world, e), "<Unnamed>");
    }
}
