//! Configuration system for the chiptune renderer

use crate::error::{ChipError, Result as ChipResult};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: String,
    pub playback: PlaybackConfig,
    pub render: RenderConfig,
    pub qa: QaConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            playback: PlaybackConfig::default(),
            render: RenderConfig::default(),
            qa: QaConfig::default(),
        }
    }
}

/// Playback timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Tempo used to convert MIDI ticks to seconds
    pub tempo_bpm: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { tempo_bpm: 120.0 }
    }
}

/// Waveform rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Silence appended after the last note ends, in seconds
    pub tail_seconds: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            tail_seconds: 1.0,
        }
    }
}

/// QA artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    /// Generate plot artifacts beside the output file
    pub enabled: bool,
    /// Plot bitmap width in pixels
    pub plot_width: u32,
    /// Plot bitmap height in pixels
    pub plot_height: u32,
    /// Maximum points drawn in the waveform overview
    pub waveform_max_points: usize,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            plot_width: 1200,
            plot_height: 600,
            waveform_max_points: 4000,
        }
    }
}

/// Validate configuration parameters before rendering
pub fn validate_config(config: &Config) -> ChipResult<()> {
    let tempo = config.playback.tempo_bpm;
    if !tempo.is_finite() || tempo <= 0.0 {
        return Err(ChipError::InvalidTempo(tempo));
    }

    if config.render.sample_rate == 0 {
        return Err(ChipError::Config(
            "sample_rate must be positive".to_string(),
        ));
    }

    if !config.render.tail_seconds.is_finite() || config.render.tail_seconds < 0.0 {
        return Err(ChipError::Config(format!(
            "tail_seconds must be non-negative, got {}",
            config.render.tail_seconds
        )));
    }

    if config.qa.enabled && (config.qa.plot_width == 0 || config.qa.plot_height == 0) {
        return Err(ChipError::Config(
            "QA plot dimensions must be positive".to_string(),
        ));
    }

    Ok(())
}

/// Load configuration from JSON file
pub fn load_config<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Save configuration to JSON file
pub fn save_config<P: AsRef<std::path::Path>>(config: &Config, path: P) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
