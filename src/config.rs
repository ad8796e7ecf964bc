//! Game tuning configuration
//!
//! Uses RON (Rusty Object Notation) so the file stays hand-editable.
//! Every field has a default, so a config file only needs the values it
//! wants to override.

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file looked up next to the executable's working directory
pub const CONFIG_FILE: &str = "runngun.ron";

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Physics and presentation constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window size in screen pixels
    pub window_width: u32,
    pub window_height: u32,
    /// Logical resolution the world is drawn at (letterboxed into the window)
    pub logical_width: f32,
    pub logical_height: f32,

    /// Downward acceleration applied to airborne dynamic entities
    pub gravity: f32,
    /// Added to velocity.y on jump (negative is up)
    pub jump_impulse: f32,
    pub player_acceleration: f32,
    pub player_max_speed: f32,
    pub enemy_acceleration: f32,
    pub enemy_max_speed: f32,
    /// Enemies chase the player when closer than this
    pub enemy_sight_range: f32,

    /// Projectile speed added to the shooter's horizontal velocity
    pub muzzle_speed: f32,
    /// Spawn X offset from the shooter when facing left / right
    pub muzzle_offset_left: f32,
    pub muzzle_offset_right: f32,
    /// Spawn Y offset from the shooter's position
    pub muzzle_offset_y: f32,
    pub projectile_max_speed: f32,
    pub projectile_damage: u32,

    /// Upper bound on a single frame's delta time, applied by the frame driver
    pub max_frame_delta: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 1600,
            window_height: 900,
            logical_width: 640.0,
            logical_height: 320.0,

            gravity: 500.0,
            jump_impulse: -200.0,
            player_acceleration: 300.0,
            player_max_speed: 100.0,
            enemy_acceleration: 30.0,
            enemy_max_speed: 15.0,
            enemy_sight_range: 100.0,

            muzzle_speed: 600.0,
            muzzle_offset_left: 0.0,
            muzzle_offset_right: 24.0,
            muzzle_offset_y: 17.0,
            projectile_max_speed: 1000.0,
            projectile_damage: 10,

            max_frame_delta: 0.1,
        }
    }
}

impl GameConfig {
    /// Load a config from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Load a config, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("failed to load {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(contents)?)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Save to a RON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = GameConfig::from_ron("(gravity: 800.0, jump_impulse: -250.0)").unwrap();
        assert_eq!(config.gravity, 800.0);
        assert_eq!(config.jump_impulse, -250.0);
        assert_eq!(config.player_max_speed, GameConfig::default().player_max_speed);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = GameConfig::default();
        config.muzzle_speed = 450.0;
        config.save(&path).unwrap();

        let loaded = GameConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let config = GameConfig::load_or_default(dir.path().join("nope.ron"));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.ron");
        fs::write(&path, "(gravity: \"lots\")").unwrap();
        assert!(matches!(GameConfig::load(&path), Err(ConfigError::Parse(_))));
    }
}
