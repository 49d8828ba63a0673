use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::map::{check_size, Room};

/// Which map generator builds the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Dungeon,
    Scatter,
}

/// Construction-time constants for one simulation run.
///
/// Every field has a default matching the stock 20x20 dungeon, so a TOML
/// file only needs to name what it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub map_width: i32,
    pub map_height: i32,
    pub generator: GeneratorKind,
    /// Dungeon room layout, in connection order.
    pub rooms: Vec<Room>,
    /// Upper bound on animals; fewer spawn if spawn points run out.
    pub animal_count: usize,
    pub fov_radius: i32,
    /// Circular field of view (squared distance) instead of a square.
    pub circular_fov: bool,
    /// Added to `Scared::factor` per scare collision.
    pub scare_increment: f32,
    /// At or above this factor the animal leaves the simulation.
    pub scare_threshold: f32,
    pub attack_damage: i32,
    pub player_health: i32,
    /// Seconds between animal steering decisions.
    pub steering_interval: f32,
    /// Seconds per fixed simulation tick.
    pub tick_rate: f64,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            map_width: 20,
            map_height: 20,
            generator: GeneratorKind::Dungeon,
            rooms: vec![
                Room::new(2, 1, 3, 3),
                Room::new(13, 1, 3, 3),
                Room::new(3, 11, 3, 3),
                Room::new(11, 14, 3, 3),
            ],
            animal_count: 5,
            fov_radius: 5,
            circular_fov: false,
            scare_increment: 0.5,
            scare_threshold: 1.0,
            attack_damage: 1,
            player_health: 10,
            steering_interval: 1.0,
            tick_rate: 1.0 / 60.0,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Load overrides from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check generator and tick preconditions before anything is built.
    pub fn validate(&self) -> Result<()> {
        check_size(self.map_width, self.map_height)?;
        if self.generator == GeneratorKind::Dungeon {
            if self.rooms.is_empty() {
                return Err(SimError::NoRooms);
            }
            for (index, room) in self.rooms.iter().enumerate() {
                if !room.fits(self.map_width, self.map_height) {
                    return Err(SimError::RoomOutOfBounds { index });
                }
            }
        }
        let max_radius = self.map_width.max(self.map_height);
        if self.fov_radius < 0 || self.fov_radius > max_radius {
            return Err(SimError::InvalidConfig(format!(
                "fov_radius must be within 0..={max_radius}, got {}",
                self.fov_radius
            )));
        }
        if self.tick_rate <= 0.0 || self.tick_rate.is_nan() {
            return Err(SimError::InvalidConfig("tick_rate must be positive".into()));
        }
        if self.steering_interval <= 0.0 || self.steering_interval.is_nan() {
            return Err(SimError::InvalidConfig(
                "steering_interval must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rooms.len(), 4);
        assert_eq!(config.scare_increment, 0.5);
    }

    #[test]
    fn toml_overrides_only_named_fields() {
        let config = SimConfig::from_toml(
            r#"
            animal_count = 2
            circular_fov = true
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.animal_count, 2);
        assert!(config.circular_fov);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.map_width, 20);
    }

    #[test]
    fn toml_room_list_and_generator() {
        let config = SimConfig::from_toml(
            r#"
            generator = "dungeon"
            rooms = [{ x = 1, y = 1, width = 2, height = 2 }]
            "#,
        )
        .unwrap();
        assert_eq!(config.rooms, vec![Room::new(1, 1, 2, 2)]);
    }

    #[test]
    fn rejects_empty_room_list() {
        let err = SimConfig::from_toml("rooms = []").unwrap_err();
        assert!(matches!(err, SimError::NoRooms));
    }

    #[test]
    fn scatter_does_not_need_rooms() {
        let config = SimConfig::from_toml(
            r#"
            generator = "scatter"
            rooms = []
            "#,
        )
        .unwrap();
        assert_eq!(config.generator, GeneratorKind::Scatter);
    }

    #[test]
    fn rejects_room_outside_map() {
        let err = SimConfig::from_toml(
            r#"
            map_width = 5
            map_height = 5
            rooms = [{ x = 3, y = 3, width = 3, height = 3 }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::RoomOutOfBounds { index: 0 }));
    }

    #[test]
    fn rejects_zero_sized_map() {
        let err = SimConfig::from_toml("map_width = 0").unwrap_err();
        assert!(matches!(err, SimError::EmptyMap { .. }));
    }

    #[test]
    fn rejects_oversized_fov_radius() {
        let err = SimConfig::from_toml("fov_radius = 50000").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
        assert!(SimConfig::from_toml("fov_radius = 20").is_ok());
    }

    #[test]
    fn rejects_oversized_map() {
        let err = SimConfig::from_toml(
            r#"
            generator = "scatter"
            map_width = 70000
            map_height = 70000
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::MapTooLarge { .. }));
    }

    #[test]
    fn rejects_oversized_room_offset() {
        let err = SimConfig::from_toml("rooms = [{ x = 2147483647, y = 0, width = 3, height = 3 }]")
            .unwrap_err();
        assert!(matches!(err, SimError::RoomOutOfBounds { index: 0 }));
    }

    #[test]
    fn rejects_non_positive_or_nan_intervals() {
        let err = SimConfig::from_toml("tick_rate = 0.0").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
        let err = SimConfig::from_toml("steering_interval = nan").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = SimConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, SimError::ConfigRead { .. }));
    }
}
