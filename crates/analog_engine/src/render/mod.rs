//! Rendering
//!
//! The renderer's job is to clear the window each frame and present it. The
//! Vulkan objects live in [`vulkan`]; [`Renderer`] drives them.

pub mod clear;
pub mod config;
pub mod frame;
pub mod renderer;
pub mod vulkan;

pub use clear::ClearColor;
pub use config::RendererConfig;
pub use frame::{FrameCycle, FrameState, FrameStatus};
pub use renderer::Renderer;
pub use vulkan::{VulkanError, VulkanResult};
