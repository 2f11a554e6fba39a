//! Application configuration (TOML)

use anyhow::{Context, Result};
use repcount_core::{ExerciseConfig, ExerciseKind};
use repcount_cv::{OverlayLayout, Rgb};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub frame_width: u32,
    pub frame_height: u32,
    /// Colour of rendered frames when replaying without camera images
    pub background: Rgb,
    /// TrueType font for overlay text; text is skipped without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    pub overlay: OverlayLayout,
    /// Per-exercise overrides of the built-in configurations
    #[serde(rename = "exercise", skip_serializing_if = "Vec::is_empty")]
    pub exercises: Vec<ExerciseConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_width: 1280,
            frame_height: 720,
            background: (24, 24, 24),
            font_path: None,
            overlay: OverlayLayout::default(),
            exercises: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config: {:?}", path))?;
        info!(path = ?path, overrides = config.exercises.len(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_toml()?).with_context(|| format!("Failed to write config: {:?}", path))?;
        Ok(())
    }

    /// Effective configuration for an exercise: the last override wins
    pub fn exercise(&self, kind: ExerciseKind) -> ExerciseConfig {
        self.exercises
            .iter()
            .rev()
            .find(|config| config.kind == kind)
            .cloned()
            .unwrap_or_else(|| kind.config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repcount_core::RepetitionPolicy;

    #[test]
    fn test_empty_file_gives_defaults() -> Result<()> {
        assert_eq!(AppConfig::from_toml("")?, AppConfig::default());
        Ok(())
    }

    #[test]
    fn test_partial_overrides() -> Result<()> {
        let config = AppConfig::from_toml(
            r#"
            frame_width = 640
            font_path = "fonts/DejaVuSans.ttf"

            [overlay]
            draw_joints = true

            [[exercise]]
            kind = "bicep-curl"
            calibration = { low = 40.0, high = 150.0 }
            counting = { policy = "boundary" }

            [exercise.metric]
            kind = "joint_angle"
            joints = [{ a = 11, vertex = 13, c = 15 }]
            "#,
        )?;

        assert_eq!(config.frame_width, 640);
        assert_eq!(config.frame_height, 720);
        assert!(config.overlay.draw_joints);
        assert_eq!(config.overlay.bar_left, 1100);

        let curl = config.exercise(ExerciseKind::BicepCurl);
        assert_eq!(curl.calibration.low(), 40.0);
        assert_eq!(curl.metric.joints()[0].vertex, 13);
        assert_eq!(curl.counting, RepetitionPolicy::Boundary);

        // untouched exercises keep their presets
        assert_eq!(config.exercise(ExerciseKind::Squat), ExerciseKind::Squat.config());
        Ok(())
    }

    #[test]
    fn test_invalid_calibration_is_rejected() {
        let result = AppConfig::from_toml(
            r#"
            [[exercise]]
            kind = "squat"
            calibration = { low = 240.0, high = 190.0 }
            counting = { policy = "boundary" }
            metric = { kind = "pair_distance", a = 27, b = 28 }
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rendered_toml_reloads() -> Result<()> {
        let mut config = AppConfig::default();
        config.exercises.push(ExerciseKind::JumpingJack.config());
        let text = config.to_toml()?;
        assert_eq!(AppConfig::from_toml(&text)?, config);
        Ok(())
    }
}
