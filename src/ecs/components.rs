use glam::IVec2;
use rustc_hash::FxHashSet;

/// Cardinal movement direction. Up is +y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, 1),
            Direction::Down => IVec2::new(0, -1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

// ---------------------------------------------------------------------------
// Persistent facets
// ---------------------------------------------------------------------------

/// Grid cell the entity stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position(pub IVec2);

/// Footprint in cells, centered on `Position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const UNIT: Size = Size { width: 1, height: 1 };
}

/// Display name used in diary lines and inspection.
#[derive(Debug, Clone)]
pub struct Name(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

/// How the renderer draws the entity.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub kind: ShapeKind,
    /// RGBA packed as u32.
    pub color: u32,
}

/// What an entity can see now and what it has ever seen.
#[derive(Debug, Clone, Default)]
pub struct FieldOfView {
    pub radius: i32,
    /// Replaced wholesale on every visibility update.
    pub visible: FxHashSet<IVec2>,
    /// Only ever grows.
    pub revealed: FxHashSet<IVec2>,
}

impl FieldOfView {
    pub fn new(radius: i32) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }

    pub fn can_see(&self, p: IVec2) -> bool {
        self.visible.contains(&p)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    /// Not clamped; can go negative.
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Fill ratio for a health bar.
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

/// Append-only narrative log.
#[derive(Debug, Clone, Default)]
pub struct Diary {
    messages: Vec<String>,
}

impl Diary {
    pub fn push(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Oldest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Up to `n` messages, most recent first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &str> {
        self.messages.iter().rev().take(n).map(String::as_str)
    }
}

/// Fear accumulated from scare collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scared {
    pub factor: f32,
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// The user-controlled entity.
#[derive(Debug, Clone, Copy)]
pub struct Player;

#[derive(Debug, Clone, Copy)]
pub struct Animal;

/// Steers toward visible non-animals.
#[derive(Debug, Clone, Copy)]
pub struct Curious;

/// Steers away from visible non-animals.
#[derive(Debug, Clone, Copy)]
pub struct Timid;

/// Attacks whatever it bumps into.
#[derive(Debug, Clone, Copy)]
pub struct Aggressive;

/// Bumping an aggressive animal frightens it.
#[derive(Debug, Clone, Copy)]
pub struct CanScareAggressiveAnimals;

// ---------------------------------------------------------------------------
// Transient markers - cleared at the end of every tick
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Moved;

#[derive(Debug, Clone, Copy)]
pub struct Spawned;

/// Bumped into `other` this tick.
#[derive(Debug, Clone, Copy)]
pub struct Collided {
    pub other: hecs::Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickedOnWorld(pub IVec2);

/// Single-use movement intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WantsToMove(pub Direction);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diary_recent_is_newest_first() {
        let mut diary = Diary::default();
        diary.push("one");
        diary.push("two");
        diary.push("three");
        let recent: Vec<_> = diary.recent(2).collect();
        assert_eq!(recent, vec!["three", "two"]);
        assert_eq!(diary.messages()[0], "one");
    }

    #[test]
    fn health_fraction_tracks_negative_values() {
        let mut hp = Health::new(10);
        assert_eq!(hp.fraction(), 1.0);
        hp.current = -5;
        assert_eq!(hp.fraction(), -0.5);
    }

    #[test]
    fn direction_deltas_are_unit_cardinals() {
        for dir in Direction::ALL {
            let d = dir.delta();
            assert_eq!(d.x.abs() + d.y.abs(), 1);
        }
        assert_eq!(Direction::Up.delta(), IVec2::Y);
    }
}
