use glam::{IVec2, Vec2};
use hecs::Or;
use rustc_hash::FxHashSet;

use crate::ecs::components::{FieldOfView, Moved, Position, Spawned};
use crate::map::Map;

/// Radius of the disc a blocking cell casts around its center.
const OCCLUDER_RADIUS: f32 = 0.5;

/// Recompute visibility for every entity that moved or spawned this tick.
pub fn update(world: &mut hecs::World, map: &Map, circular: bool) {
    for (_, (pos, fov, _)) in
        world.query_mut::<(&Position, &mut FieldOfView, Or<&Moved, &Spawned>)>()
    {
        refresh(fov, pos.0, map, circular);
    }
}

/// Replace `fov.visible` with what `origin` can see, and fold it into
/// `fov.revealed`.
pub fn refresh(fov: &mut FieldOfView, origin: IVec2, map: &Map, circular: bool) {
    let candidates = candidates(origin, fov.radius, map, circular);

    let start = origin.as_vec2();
    let visible: FxHashSet<IVec2> = candidates
        .iter()
        .copied()
        .filter(|&target| {
            let end = target.as_vec2();
            !candidates.iter().any(|&cell| {
                cell != target
                    && cell != origin
                    && map.tile(cell.x, cell.y).is_some_and(|t| t.blocks())
                    && segment_hits_circle(start, end, cell.as_vec2(), OCCLUDER_RADIUS)
            })
        })
        .collect();

    fov.revealed.extend(visible.iter().copied());
    fov.visible = visible;
}

/// In-bounds cells within `radius` of `origin`: a square, or a disc when
/// `circular` is set.
fn candidates(origin: IVec2, radius: i32, map: &Map, circular: bool) -> Vec<IVec2> {
    let mut out = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)).max(1) as usize);
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            if circular && dx * dx + dy * dy > radius * radius {
                continue;
            }
            let p = origin + IVec2::new(dx, dy);
            if map.in_bounds(p.x, p.y) {
                out.push(p);
            }
        }
    }
    out
}

/// True if the closest point of segment `start..end` lies strictly inside
/// the circle.
fn segment_hits_circle(start: Vec2, end: Vec2, center: Vec2, radius: f32) -> bool {
    let seg = end - start;
    let len = seg.length();
    let closest = if len == 0.0 {
        start
    } else {
        let dir = seg / len;
        let u = (center - start).dot(dir);
        if u <= 0.0 {
            start
        } else if u >= len {
            end
        } else {
            start + dir * u
        }
    };
    closest.distance_squared(center) < radius * radius
}
