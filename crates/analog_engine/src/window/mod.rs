//! Window management using GLFW
//!
//! Provides window creation and event handling for the Vulkan presenter. The
//! window is created hidden and only appears once [`Window::show`] is called,
//! so the surface and swapchain can be set up before the first frame is seen.

pub mod config;
pub mod events;

pub use config::WindowConfig;
pub use events::AppEvent;

use thiserror::Error;

use crate::config::ConfigError;
use crate::foundation::math::{pixel_projection, Mat4};

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The requested settings cannot produce a window
    #[error("Invalid window configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// `glfwInit` failed
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// `glfwCreateWindow` returned no window
    #[error("Window creation failed")]
    CreationFailed,

    /// Any other GLFW failure
    #[error("GLFW error: {0}")]
    GlfwError(String),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window wrapper with proper resource management
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    title: String,
}

impl Window {
    /// Create a hidden window from the given settings
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        config.validate()?;

        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        if !glfw.vulkan_supported() {
            return Err(WindowError::InitializationFailed(
                "Vulkan is not available through GLFW".to_string(),
            ));
        }

        // Configure for Vulkan (no OpenGL context)
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));
        glfw.window_hint(glfw::WindowHint::Visible(false));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_iconify_polling(true);
        window.set_focus_polling(true);

        log::info!("Created window '{}' ({}x{})", config.title, config.width, config.height);

        Ok(Self {
            glfw,
            window,
            events,
            title: config.title.clone(),
        })
    }

    /// Make the window visible
    pub fn show(&mut self) {
        self.window.show();
    }

    /// Whether the window has been asked to close
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Request (or cancel a request) that the window close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Process pending events without blocking
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Block until at least one event arrives
    pub fn wait_events(&mut self) {
        self.glfw.wait_events();
    }

    /// Take every queued event the engine cares about
    pub fn drain_events(&self) -> Vec<AppEvent> {
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| events::translate(&event))
            .collect()
    }

    /// Client area size in screen coordinates
    pub fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (clamp_dimension(width), clamp_dimension(height))
    }

    /// Drawable area size in pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (clamp_dimension(width), clamp_dimension(height))
    }

    /// Window title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Orthographic projection mapping framebuffer pixels to clip space
    pub fn projection(&self) -> Mat4 {
        let (width, height) = self.framebuffer_size();
        pixel_projection(width, height)
    }

    /// Get required Vulkan instance extensions from GLFW
    pub fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        self.glfw
            .get_required_instance_extensions()
            .ok_or_else(|| WindowError::GlfwError("Failed to get required extensions".to_string()))
    }

    /// Create Vulkan surface using GLFW's built-in functionality
    pub fn create_vulkan_surface(&mut self, instance: ash::vk::Instance) -> WindowResult<ash::vk::SurfaceKHR> {
        let mut surface = ash::vk::SurfaceKHR::null();
        let result = self.window.create_window_surface(instance, std::ptr::null(), &mut surface);

        if result == ash::vk::Result::SUCCESS {
            Ok(surface)
        } else {
            Err(WindowError::GlfwError(format!("Failed to create Vulkan surface: {result:?}")))
        }
    }
}

fn clamp_dimension(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
