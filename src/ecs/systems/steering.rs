use glam::{IVec2, Vec2};

use crate::ecs::components::{
    Animal, Curious, Direction, FieldOfView, Position, Timid, WantsToMove,
};

/// Fires once per `interval` seconds of accumulated tick time.
#[derive(Debug, Clone)]
pub struct SteeringClock {
    interval: f32,
    elapsed: f32,
}

impl SteeringClock {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`; true when a steering round is due.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            true
        } else {
            false
        }
    }
}

/// Give every curious or timid animal a movement intent based on the
/// non-animals it can currently see.
pub fn update(world: &mut hecs::World) {
    // Pass 1 (read): everything an animal could react to
    let targets: Vec<IVec2> = world
        .query::<&Position>()
        .without::<&Animal>()
        .iter()
        .map(|(_, pos)| pos.0)
        .collect();

    let mut intents = Vec::new();
    for (entity, (pos, fov, curious, timid)) in world
        .query::<(&Position, &FieldOfView, Option<&Curious>, Option<&Timid>)>()
        .with::<&Animal>()
        .iter()
    {
        if curious.is_none() && timid.is_none() {
            continue;
        }
        let seen = targets.iter().copied().filter(|t| fov.can_see(*t));
        if let Some(dir) = steer(pos.0, seen, curious.is_some(), timid.is_some()) {
            intents.push((entity, dir));
        }
    }

    // Pass 2 (write)
    for (entity, dir) in intents {
        log::trace!("{entity:?} steers {dir:?}");
        let _ = world.insert_one(entity, WantsToMove(dir));
    }
}

/// Sum unit vectors toward (curious) and away from (timid) each visible
/// target, then snap the result to a cardinal direction. Both flags add up
/// independently. `None` when the sum is zero.
pub fn steer(
    from: IVec2,
    visible_targets: impl IntoIterator<Item = IVec2>,
    curious: bool,
    timid: bool,
) -> Option<Direction> {
    let origin = from.as_vec2();
    let mut sum = Vec2::ZERO;
    for target in visible_targets {
        let toward = (target.as_vec2() - origin).normalize_or_zero();
        if curious {
            sum += toward;
        }
        if timid {
            sum -= toward;
        }
    }
    snap_to_cardinal(sum.normalize_or_zero())
}

/// Dominant axis wins; an exact tie goes to the horizontal axis.
fn snap_to_cardinal(v: Vec2) -> Option<Direction> {
    if v == Vec2::ZERO {
        return None;
    }
    let dir = if v.x.abs() >= v.y.abs() {
        if v.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if v.y > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };
    Some(dir)
}
