//! Window settings

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Title used by the calculator shell
pub const DEFAULT_TITLE: &str = "AnalogEngineerCalculator";
/// Default client width in pixels
pub const DEFAULT_WIDTH: u32 = 1920;
/// Default client height in pixels
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,

    /// Whether the user may resize the window
    pub resizable: bool,

    /// Close the window when Escape is pressed
    pub close_on_escape: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            resizable: false,
            close_on_escape: false,
        }
    }
}

impl WindowConfig {
    /// Check the values GLFW cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                field: "window.width/height",
                reason: format!("{}x{} has a zero dimension", self.width, self.height),
            });
        }
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(ConfigError::Invalid {
                field: "window.width/height",
                reason: format!("{}x{} exceeds the platform limit", self.width, self.height),
            });
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "window.title",
                reason: "title is empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full_hd_calculator() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "AnalogEngineerCalculator");
        assert_eq!((config.width, config.height), (1920, 1080));
        assert!(!config.resizable);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_size_rejected() {
        let config = WindowConfig { width: 0, ..WindowConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));

        let config = WindowConfig { height: 0, ..WindowConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_title_rejected() {
        let config = WindowConfig { title: "   ".to_string(), ..WindowConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "window.title", .. })
        ));
    }
}
