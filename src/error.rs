use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("map must be at least 1x1, got {width}x{height}")]
    EmptyMap { width: i32, height: i32 },

    #[error("map {width}x{height} exceeds the {max} cell side limit")]
    MapTooLarge { width: i32, height: i32, max: i32 },

    #[error("room layout is empty")]
    NoRooms,

    #[error("room {index} does not fit inside the map")]
    RoomOutOfBounds { index: usize },

    #[error("generated map has no walkable cell to spawn on")]
    NoWalkableSpawn,

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
