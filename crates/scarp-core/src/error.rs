//! Error types for Scarp

use thiserror::Error;

/// The main error type for Scarp operations
#[derive(Debug, Error)]
pub enum ScarpError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Terrain error: {0}")]
    TerrainError(String),

    #[error("Heightmap error: {0}")]
    HeightmapError(String),

    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Image error: {0}")]
    ImageError(String),
}

/// Result type alias for Scarp operations
pub type Result<T> = std::result::Result<T, ScarpError>;

impl From<toml::de::Error> for ScarpError {
    fn from(err: toml::de::Error) -> Self {
        ScarpError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for ScarpError {
    fn from(err: toml::ser::Error) -> Self {
        ScarpError::TomlSerError(err.to_string())
    }
}
