//! Vulkan backend
//!
//! RAII wrappers around the objects the presenter needs to clear and present frames.

pub mod commands;
pub mod context;
pub mod framebuffer;
pub mod render_pass;
pub mod surface;
pub mod swapchain;
pub mod sync;

pub use commands::{ActiveRenderPass, CommandPool, CommandRecorder};
pub use context::{PhysicalDeviceInfo, VulkanContext, VulkanError, VulkanInstance, VulkanResult};
pub use framebuffer::{DepthBuffer, Framebuffer};
pub use render_pass::RenderPass;
pub use surface::PresentationSurface;
pub use swapchain::Swapchain;
pub use sync::{Fence, FrameSync, Semaphore};
