use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::assessment::BandPolicy;
use crate::paths;

/// Application configuration, loaded from the XDG config directory.
///
/// Every field carries a default via `#[serde(default)]`, so the config
/// file is optional and may specify only the values the user cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub audio: AudioConfig,
    pub assessment: AssessmentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// De-click gain ramp length in milliseconds for tone onset/offset and
    /// volume changes.
    pub ramp_ms: f32,
    /// Amplitude each sweep frequency starts at.
    pub start_volume: f32,
    /// Amplitude change per volume keypress in the sweep screen.
    pub volume_step: f32,
}

/// The severity banding policy. These cut points are a screening heuristic;
/// they can be tuned, but worse inputs must never map to a better band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    /// Mean threshold at or above this is normal hearing.
    pub normal_min: f32,
    /// Mean threshold at or above this is mild loss.
    pub mild_min: f32,
    /// Mean threshold at or above this is moderate loss; below is severe.
    pub moderate_min: f32,
    /// Questionnaire scores below this shift the band one step worse.
    pub low_score_cutoff: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            assessment: AssessmentConfig::default(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            ramp_ms: 10.0,
            start_volume: 0.5,
            volume_step: 0.05,
        }
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        let policy = BandPolicy::default();
        Self {
            normal_min: policy.normal_min,
            mild_min: policy.mild_min,
            moderate_min: policy.moderate_min,
            low_score_cutoff: policy.low_score_cutoff,
        }
    }
}

/// Bridge from the user-facing config format to the policy table the
/// scoring engine consumes.
impl From<&AssessmentConfig> for BandPolicy {
    fn from(cfg: &AssessmentConfig) -> Self {
        BandPolicy {
            normal_min: cfg.normal_min,
            mild_min: cfg.mild_min,
            moderate_min: cfg.moderate_min,
            low_score_cutoff: cfg.low_score_cutoff,
        }
    }
}

/// Load the application config from the XDG config dir, or defaults if the
/// file doesn't exist.
pub fn load_config() -> Result<AppConfig> {
    let path = paths::config_file();

    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
