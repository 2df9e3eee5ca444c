use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the displacement and load values live in the spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub load_column: String,
    /// Zero-based column used when the sheet is wide enough.
    pub displacement_column: usize,
    pub fallback_displacement_column: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            load_column: "Load [N]".to_string(),
            displacement_column: 3,
            fallback_displacement_column: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub render_width: u32,
    pub render_height: u32,
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            render_width: 800,
            render_height: 600,
            ffmpeg_path: None,
            ffprobe_path: None,
        }
    }
}

impl VideoConfig {
    pub fn ffmpeg(&self) -> PathBuf {
        self.ffmpeg_path.clone().unwrap_or_else(|| PathBuf::from("ffmpeg"))
    }

    pub fn ffprobe(&self) -> PathBuf {
        self.ffprobe_path.clone().unwrap_or_else(|| PathBuf::from("ffprobe"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub video: VideoConfig,
    /// Upper bound on the wait between autonomous frame advances.
    pub tick_interval_ms: u64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            video: VideoConfig::default(),
            tick_interval_ms: 1,
            window_width: 1000.0,
            window_height: 760.0,
        }
    }
}

impl AppConfig {
    /// Reads the optional config file. Nothing is ever written back.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();
        if !config_path.exists() {
            log::debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file at {}: {}", config_path.display(), e))?;

        match serde_json::from_str::<Self>(&content) {
            Ok(config) => {
                log::info!("Loaded config from {}", config_path.display());
                Ok(config)
            }
            Err(e) => {
                log::warn!("Config file {} is malformed ({}), using defaults", config_path.display(), e);
                Ok(Self::default())
            }
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("slowmo-sync")
            .join("config.json")
    }
}
