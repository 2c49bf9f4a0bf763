use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glquad".to_string(),
            width: 640,
            height: 480,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub shader_path: PathBuf,
    pub clear_color: [f32; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shader_path: PathBuf::from("assets/shaders/basic.shader"),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Reads the config file, writing one with the defaults first if it does not
/// exist yet.
pub fn load_or_create_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let default_config = AppConfig::default();
        let toml_content = toml::to_string_pretty(&default_config)?;
        std::fs::write(path, toml_content).context("Failed to write default config")?;
        return Ok(default_config);
    }

    let content = std::fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}
