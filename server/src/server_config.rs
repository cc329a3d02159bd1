use std::fs;
use std::path::Path;

use engine::{Mode, DEFAULT_GRID_SIZE};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "snake_arcade_config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub static_files_path: String,
    pub grid_size: usize,
    pub seed_demo_data: bool,
    pub spectator_games: Vec<SpectatorGameConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectatorGameConfig {
    pub name: String,
    pub mode: Mode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            static_files_path: "./ui".to_string(),
            grid_size: DEFAULT_GRID_SIZE,
            seed_demo_data: true,
            spectator_games: vec![
                SpectatorGameConfig {
                    name: "NeonViper".to_string(),
                    mode: Mode::Walls,
                },
                SpectatorGameConfig {
                    name: "PixelHunter".to_string(),
                    mode: Mode::Passthrough,
                },
                SpectatorGameConfig {
                    name: "RetroGamer".to_string(),
                    mode: Mode::Walls,
                },
                SpectatorGameConfig {
                    name: "SpeedDemon".to_string(),
                    mode: Mode::Passthrough,
                },
            ],
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.bind_address.is_empty() {
            return Err("bind_address must not be empty".to_string());
        }
        if self.grid_size < 10 || self.grid_size > 100 {
            return Err("grid_size must be between 10 and 100".to_string());
        }
        for game in &self.spectator_games {
            if game.name.is_empty() {
                return Err("spectator game name must not be empty".to_string());
            }
        }
        Ok(())
    }

    /// A missing file falls back to the defaults; a present but
    /// unreadable or invalid file is an error.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        let config: Self = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;
        Ok(config)
    }
}
