//! Renderer settings

use serde::{Deserialize, Serialize};

use super::clear::ClearColor;
use crate::config::ConfigError;

/// Renderer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Colour the frame is cleared to
    pub clear_color: ClearColor,

    /// Depth the depth buffer is cleared to
    pub clear_depth: f32,

    /// Maximum number of frames the CPU may record ahead of the GPU
    pub max_frames_in_flight: usize,

    /// Enable Vulkan validation layers; `None` follows the build profile
    pub enable_validation: Option<bool>,

    /// Avoid tearing present modes
    pub vsync: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: ClearColor::BLACK,
            clear_depth: 1.0,
            max_frames_in_flight: 2,
            enable_validation: None,
            vsync: true,
        }
    }
}

impl RendererConfig {
    /// Whether validation layers should be requested
    pub fn validation_enabled(&self) -> bool {
        self.enable_validation.unwrap_or(cfg!(debug_assertions))
    }

    /// Check ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.clear_color.is_valid() {
            return Err(ConfigError::Invalid {
                field: "renderer.clear_color",
                reason: format!("{:?} has a channel outside 0..=1", self.clear_color),
            });
        }
        if !(0.0..=1.0).contains(&self.clear_depth) {
            return Err(ConfigError::Invalid {
                field: "renderer.clear_depth",
                reason: format!("{} is outside 0..=1", self.clear_depth),
            });
        }
        if self.max_frames_in_flight == 0 {
            return Err(ConfigError::Invalid {
                field: "renderer.max_frames_in_flight",
                reason: "at least one frame must be allowed in flight".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RendererConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_frames_in_flight, 2);
        assert!(config.vsync);
        assert_eq!(config.validation_enabled(), cfg!(debug_assertions));
    }

    #[test]
    fn test_explicit_validation_overrides_profile() {
        let config = RendererConfig { enable_validation: Some(false), ..RendererConfig::default() };
        assert!(!config.validation_enabled());
    }

    #[test]
    fn test_invalid_ranges() {
        let depth = RendererConfig { clear_depth: 1.5, ..RendererConfig::default() };
        assert!(matches!(depth.validate(), Err(ConfigError::Invalid { field: "renderer.clear_depth", .. })));

        let frames = RendererConfig { max_frames_in_flight: 0, ..RendererConfig::default() };
        assert!(frames.validate().is_err());

        let color = RendererConfig { clear_color: ClearColor::rgb(2.0, 0.0, 0.0), ..RendererConfig::default() };
        assert!(color.validate().is_err());
    }
}
