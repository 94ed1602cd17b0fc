//! Configuration System
//!
//! Loads world tuning parameters from world.toml so runs can be
//! adjusted without recompiling.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default tuning file path
pub const DEFAULT_CONFIG_PATH: &str = "world.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    pub simulation: SimulationConfig,
    pub world: WorldConfig,
    pub pawns: PawnConfig,
}

/// Run-level parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub default_ticks: u64,
    pub default_seed: u64,
    pub progress_interval: u64,
}

/// Terrain generation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct WorldConfig {
    /// Chunks are generated in a square of side `2 * chunk_radius + 1`
    /// centered on the origin.
    pub chunk_radius: i32,
    pub chunk_size: f32,
    pub trees_per_chunk: u32,
    pub rocks_per_chunk: u32,
    pub wood_per_tree: u32,
    pub stone_per_rock: u32,
}

/// Pawn spawning parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PawnConfig {
    pub count: u32,
    pub speed: f32,
    pub starting_gold: u32,
    pub starting_apples: u32,
    pub spawn_radius: f32,
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from the default path, or fall back to the
    /// built-in defaults when the file is absent or malformed.
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            eprintln!("Warning: Could not load {DEFAULT_CONFIG_PATH}: {e}. Using defaults.");
            Self::default()
        })
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                default_ticks: 1000,
                default_seed: 42,
                progress_interval: 100,
            },
            world: WorldConfig {
                chunk_radius: 2,
                chunk_size: 16.0,
                trees_per_chunk: 3,
                rocks_per_chunk: 2,
                wood_per_tree: 5,
                stone_per_rock: 3,
            },
            pawns: PawnConfig {
                count: 12,
                speed: 1.0,
                starting_gold: 10,
                starting_apples: 2,
                spawn_radius: 20.0,
            },
        }
    }
}

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let config = SimConfig::default();
        assert!(config.simulation.default_ticks > 0);
        assert!(config.world.chunk_size > 0.0);
        assert!(config.pawns.count > 0);
    }

    #[test]
    fn parses_full_toml() {
        let text = r#"
            [simulation]
            default_ticks = 50
            default_seed = 7
            progress_interval = 10

            [world]
            chunk_radius = 1
            chunk_size = 8.0
            trees_per_chunk = 2
            rocks_per_chunk = 1
            wood_per_tree = 4
            stone_per_rock = 2

            [pawns]
            count = 3
            speed = 1.5
            starting_gold = 6
            starting_apples = 1
            spawn_radius = 5.0
        "#;
        let config: SimConfig = toml::from_str(text).unwrap();
        assert_eq!(config.simulation.default_ticks, 50);
        assert_eq!(config.world.trees_per_chunk, 2);
        assert_eq!(config.pawns.speed, 1.5);
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = toml::from_str::<SimConfig>("[simulation]\ndefault_ticks = \"lots\"");
        assert!(err.is_err());
    }
}
