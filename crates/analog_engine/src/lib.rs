//! # Analog Engine
//!
//! Window and presentation layer for the AnalogEngineerCalculator desktop
//! application: a GLFW window cleared and presented every frame through Vulkan.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use analog_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     analog_engine::foundation::logging::init();
//!     let mut engine = Engine::new(EngineConfig::default())?;
//!     engine.run()
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod foundation;
pub mod render;
pub mod window;

mod engine;

pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat},
        foundation::math::Mat4,
        render::{ClearColor, Renderer, RendererConfig},
        window::{AppEvent, Window, WindowConfig},
        Engine, EngineConfig, EngineError,
    };
}
