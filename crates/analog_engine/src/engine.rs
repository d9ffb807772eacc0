//! Core engine implementation
//!
//! Owns the window and the renderer and runs the show / clear / post / poll loop.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::foundation::time::FrameTimer;
use crate::render::{FrameStatus, Renderer, RendererConfig, VulkanError};
use crate::window::{AppEvent, Window, WindowConfig, WindowError};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window configuration
    pub window: WindowConfig,

    /// Renderer configuration
    pub renderer: RendererConfig,

    /// Seconds between frame-rate log lines; 0 disables them
    pub stats_interval_secs: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            renderer: RendererConfig::default(),
            stats_interval_secs: 5.0,
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        self.renderer.validate()?;
        if let Err(e) = Duration::try_from_secs_f32(self.stats_interval_secs) {
            return Err(ConfigError::Invalid {
                field: "stats_interval_secs",
                reason: format!("{} is not a usable number of seconds: {e}", self.stats_interval_secs),
            });
        }
        Ok(())
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Window system failure
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Rendering failure
    #[error("Rendering error: {0}")]
    Render(#[from] VulkanError),
}

/// What the loop must do after a batch of events
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct LoopControl {
    close: bool,
    resized: bool,
    minimized: bool,
}

impl LoopControl {
    fn apply(&mut self, event: AppEvent, close_on_escape: bool) {
        match event {
            AppEvent::CloseRequested => self.close = true,
            AppEvent::KeyPressed(glfw::Key::Escape) if close_on_escape => self.close = true,
            AppEvent::FramebufferResized { width, height } => {
                self.resized = true;
                self.minimized = width == 0 || height == 0;
            }
            AppEvent::Minimized(minimized) => self.minimized = minimized,
            AppEvent::Focused(_) | AppEvent::KeyPressed(_) | AppEvent::KeyReleased(_) => {}
        }
    }
}

/// Main engine struct
///
/// The renderer is declared before the window so it is dropped first; the
/// Vulkan surface must go before the GLFW window it was created from.
pub struct Engine {
    renderer: Renderer,
    window: Window,
    config: EngineConfig,
    timer: FrameTimer,
    minimized: bool,
}

impl Engine {
    /// Create the window and renderer
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;

        let mut window = Window::new(&config.window)?;
        let renderer = Renderer::new(&mut window, &config.renderer)?;
        let timer = FrameTimer::new(config.stats_interval_secs);

        let engine = Self {
            renderer,
            window,
            config,
            timer,
            minimized: false,
        };
        engine.log_projection();
        Ok(engine)
    }

    /// Show the window and run until it is closed
    pub fn run(&mut self) -> Result<(), EngineError> {
        self.window.show();
        log::info!("Starting main loop...");

        while !self.window.should_close() {
            self.frame()?;
        }

        self.renderer.wait_idle()?;
        log::info!("Engine shutdown complete after {} frames", self.timer.frame_count());
        Ok(())
    }

    /// One loop iteration: clear, post, then pump events
    fn frame(&mut self) -> Result<(), EngineError> {
        let status = self.renderer.clear(&self.window)?;
        self.renderer.post(&self.window)?;

        if self.minimized {
            // Nothing to draw; sleep until the window system has news
            self.window.wait_events();
        } else {
            self.window.poll_events();
        }
        self.handle_events();

        if status == FrameStatus::Cleared {
            if let Some(fps) = self.timer.tick() {
                log::debug!("{fps:.1} frames per second");
            }
        }
        Ok(())
    }

    fn handle_events(&mut self) {
        let mut control = LoopControl {
            minimized: self.minimized,
            ..LoopControl::default()
        };
        for event in self.window.drain_events() {
            log::trace!("{event:?}");
            control.apply(event, self.config.window.close_on_escape);
        }

        if control.close {
            log::info!("Close requested");
            self.window.set_should_close(true);
        }
        if control.resized {
            self.renderer.notify_resized();
            self.log_projection();
        }
        self.minimized = control.minimized;
    }

    fn log_projection(&self) {
        let projection = self.window.projection();
        let (width, height) = self.window.framebuffer_size();
        log::debug!(
            "Pixel projection for {width}x{height}: scale ({:.6}, {:.6})",
            projection[(0, 0)],
            projection[(1, 1)]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;
    use crate::render::ClearColor;
    use glfw::Key;

    #[test]
    fn test_default_engine_config() {
        let config = EngineConfig::default();
        assert_eq!(config.window.title, "AnalogEngineerCalculator");
        assert_eq!((config.window.width, config.window.height), (1920, 1080));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let text = r#"
            [window]
            width = 1280

            [renderer.clear_color]
            r = 0.8
            g = 0.3
            b = 0.1
        "#;
        let config = EngineConfig::from_str_as(text, ConfigFormat::Toml).unwrap();

        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 1080);
        assert_eq!(config.window.title, "AnalogEngineerCalculator");
        assert_eq!(config.renderer.clear_color, ClearColor::rgb(0.8, 0.3, 0.1));
        assert_eq!(config.renderer.max_frames_in_flight, 2);
    }

    #[test]
    fn test_ron_document() {
        let text = "(window: (title: \"Calc\", resizable: true), stats_interval_secs: 0.0)";
        let config = EngineConfig::from_str_as(text, ConfigFormat::Ron).unwrap();
        assert_eq!(config.window.title, "Calc");
        assert!(config.window.resizable);
        assert_eq!(config.stats_interval_secs, 0.0);
    }

    #[test]
    fn test_invalid_sections_rejected() {
        let mut config = EngineConfig::default();
        config.window.height = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.stats_interval_secs = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "stats_interval_secs", .. })
        ));
    }

    #[test]
    fn test_stats_interval_beyond_duration_range_rejected() {
        let config = EngineConfig::from_str_as("stats_interval_secs = 1e30", ConfigFormat::Toml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "stats_interval_secs", .. })
        ));

        let mut config = EngineConfig::default();
        config.stats_interval_secs = f32::INFINITY;
        assert!(config.validate().is_err());

        config.stats_interval_secs = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_close_request_closes() {
        let mut control = LoopControl::default();
        control.apply(AppEvent::CloseRequested, false);
        assert!(control.close);
    }

    #[test]
    fn test_escape_only_closes_when_enabled() {
        let mut control = LoopControl::default();
        control.apply(AppEvent::KeyPressed(Key::Escape), false);
        assert!(!control.close);

        control.apply(AppEvent::KeyPressed(Key::Escape), true);
        assert!(control.close);

        let mut control = LoopControl::default();
        control.apply(AppEvent::KeyPressed(Key::Enter), true);
        assert!(!control.close);
    }

    #[test]
    fn test_resize_and_minimize_tracking() {
        let mut control = LoopControl::default();
        control.apply(AppEvent::Minimized(true), false);
        assert!(control.minimized);

        control.apply(AppEvent::FramebufferResized { width: 0, height: 0 }, false);
        assert!(control.resized);
        assert!(control.minimized);

        control.apply(AppEvent::FramebufferResized { width: 800, height: 600 }, false);
        assert!(!control.minimized);

        control.apply(AppEvent::Focused(true), false);
        assert_eq!(control, LoopControl { close: false, resized: true, minimized: false });
    }

    #[test]
    fn test_error_conversions() {
        let err: EngineError = ConfigError::Parse("bad".to_string()).into();
        assert!(err.to_string().starts_with("Configuration error"));

        let err: EngineError = WindowError::CreationFailed.into();
        assert!(matches!(err, EngineError::Window(WindowError::CreationFailed)));
    }
}
