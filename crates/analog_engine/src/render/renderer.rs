//! Frame presenter
//!
//! Clears the window's colour and depth buffers and presents the result. A
//! frame is split into [`Renderer::clear`] (wait, acquire, record) and
//! [`Renderer::post`] (submit, present), mirroring a clear/swap-buffers loop.

use ash::vk;

use super::clear::clear_values;
use super::config::RendererConfig;
use super::frame::{FrameCycle, FrameStatus};
use super::vulkan::{
    CommandPool, CommandRecorder, DepthBuffer, FrameSync, Framebuffer, RenderPass, Semaphore, VulkanContext,
    VulkanError, VulkanResult,
};
use crate::window::Window;

/// Everything that depends on the current swapchain images
struct FrameTargets {
    framebuffers: Vec<Framebuffer>,
    #[allow(dead_code)] // Attached to every framebuffer
    depth_buffer: DepthBuffer,
    render_pass: RenderPass,
    /// One per swapchain image, signalled when the image may be presented
    render_finished: Vec<Semaphore>,
}

impl FrameTargets {
    fn new(context: &VulkanContext) -> VulkanResult<Self> {
        let device = context.device();
        let swapchain = context.swapchain();
        let extent = swapchain.extent();

        let depth_buffer = DepthBuffer::new(
            device.clone(),
            context.instance(),
            context.physical_device().device,
            extent,
        )?;
        let render_pass = RenderPass::new_clear_pass(device.clone(), swapchain.format().format, depth_buffer.format())?;

        let framebuffers = swapchain
            .image_views()
            .iter()
            .map(|&view| {
                Framebuffer::new(
                    device.clone(),
                    render_pass.handle(),
                    &[view, depth_buffer.image_view()],
                    extent,
                )
            })
            .collect::<VulkanResult<Vec<_>>>()?;

        let render_finished = (0..swapchain.image_count())
            .map(|_| Semaphore::new(device.clone()))
            .collect::<VulkanResult<Vec<_>>>()?;

        Ok(Self {
            framebuffers,
            depth_buffer,
            render_pass,
            render_finished,
        })
    }
}

/// Vulkan presenter for a single window
///
/// Fields are declared in destruction order: everything created from the
/// device goes before the context that owns it.
pub struct Renderer {
    frame_syncs: Vec<FrameSync>,
    command_buffers: Vec<vk::CommandBuffer>,
    #[allow(dead_code)] // Owns the command buffers above
    command_pool: CommandPool,
    targets: FrameTargets,
    /// Fence of the frame last submitted for each swapchain image
    images_in_flight: Vec<vk::Fence>,
    context: VulkanContext,
    cycle: FrameCycle,
    clear_values: [vk::ClearValue; 2],
    framebuffer_resized: bool,
}

impl Renderer {
    /// Create the Vulkan presenter for `window`
    pub fn new(window: &mut Window, config: &RendererConfig) -> VulkanResult<Self> {
        config
            .validate()
            .map_err(|e| VulkanError::InitializationFailed(e.to_string()))?;

        let app_name = window.title().to_string();
        let context = VulkanContext::new(window, &app_name, config.validation_enabled(), config.vsync)?;
        let targets = FrameTargets::new(&context)?;

        let frames_in_flight = config.max_frames_in_flight;
        let command_pool = CommandPool::new(context.device().clone(), context.graphics_queue_family())?;
        let frame_count = u32::try_from(frames_in_flight).map_err(|_| VulkanError::InvalidOperation {
            reason: format!("{frames_in_flight} frames in flight is too many"),
        })?;
        let command_buffers = command_pool.allocate_command_buffers(frame_count)?;
        let frame_syncs = (0..frames_in_flight)
            .map(|_| FrameSync::new(context.device().clone()))
            .collect::<VulkanResult<Vec<_>>>()?;

        let images_in_flight = vec![vk::Fence::null(); context.swapchain().image_count()];

        log::info!(
            "Renderer ready: {} swapchain images, {:?}, {} frames in flight",
            images_in_flight.len(),
            context.swapchain().present_mode(),
            frames_in_flight
        );

        Ok(Self {
            frame_syncs,
            command_buffers,
            command_pool,
            targets,
            images_in_flight,
            context,
            cycle: FrameCycle::new(frames_in_flight),
            clear_values: clear_values(config.clear_color, config.clear_depth),
            framebuffer_resized: false,
        })
    }

    /// Flag that the framebuffer changed size; the swapchain is rebuilt before the next frame
    pub fn notify_resized(&mut self) {
        self.framebuffer_resized = true;
    }

    /// Start a frame: acquire a swapchain image and record the colour/depth clear
    pub fn clear(&mut self, window: &Window) -> VulkanResult<FrameStatus> {
        self.cycle.ensure_idle()?;

        let (width, height) = window.framebuffer_size();
        if width == 0 || height == 0 {
            self.cycle.skip()?;
            return Ok(FrameStatus::Skipped);
        }

        if self.framebuffer_resized {
            self.recreate_swapchain(window)?;
        }

        let frame = self.cycle.current_frame();
        self.frame_syncs[frame].in_flight.wait(u64::MAX)?;

        let acquire = unsafe {
            let swapchain = self.context.swapchain();
            swapchain.loader().acquire_next_image(
                swapchain.handle(),
                u64::MAX,
                self.frame_syncs[frame].image_available.handle(),
                vk::Fence::null(),
            )
        };
        let image_index = match acquire {
            Ok((index, _suboptimal)) => index,
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                log::debug!("Swapchain out of date on acquire");
                self.recreate_swapchain(window)?;
                self.cycle.skip()?;
                return Ok(FrameStatus::Skipped);
            }
            Err(e) => return Err(VulkanError::Api(e)),
        };

        // An earlier frame may still be rendering into this image
        let image_fence = self.images_in_flight[image_index as usize];
        if image_fence != vk::Fence::null() {
            unsafe { self.context.device().wait_for_fences(&[image_fence], true, u64::MAX)? };
        }
        self.images_in_flight[image_index as usize] = self.frame_syncs[frame].in_flight.handle();

        self.record_clear(frame, image_index)?;
        self.cycle.begin(image_index)?;
        Ok(FrameStatus::Cleared)
    }

    /// Finish a frame: submit the recorded clear and present the image
    pub fn post(&mut self, window: &Window) -> VulkanResult<()> {
        let frame = self.cycle.current_frame();
        let Some(image_index) = self.cycle.finish()? else {
            return Ok(());
        };

        let sync = &self.frame_syncs[frame];
        sync.in_flight.reset()?;

        let wait_semaphores = [sync.image_available.handle()];
        let wait_stages = [vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT];
        let signal_semaphores = [self.targets.render_finished[image_index as usize].handle()];
        let command_buffers = [self.command_buffers[frame]];

        let submit_info = vk::SubmitInfo::builder()
            .wait_semaphores(&wait_semaphores)
            .wait_dst_stage_mask(&wait_stages)
            .command_buffers(&command_buffers)
            .signal_semaphores(&signal_semaphores)
            .build();

        unsafe {
            self.context
                .device()
                .queue_submit(self.context.graphics_queue(), &[submit_info], sync.in_flight.handle())?;
        }

        let swapchains = [self.context.swapchain().handle()];
        let image_indices = [image_index];
        let present_info = vk::PresentInfoKHR::builder()
            .wait_semaphores(&signal_semaphores)
            .swapchains(&swapchains)
            .image_indices(&image_indices);

        let present = unsafe {
            self.context
                .swapchain()
                .loader()
                .queue_present(self.context.present_queue(), &present_info)
        };
        let stale = match present {
            Ok(suboptimal) => suboptimal,
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => true,
            Err(e) => return Err(VulkanError::Api(e)),
        };

        if stale || self.framebuffer_resized {
            self.recreate_swapchain(window)?;
        }
        Ok(())
    }

    /// Block until the GPU has finished every submitted frame
    pub fn wait_idle(&self) -> VulkanResult<()> {
        self.context.wait_idle()
    }

    fn record_clear(&self, frame: usize, image_index: u32) -> VulkanResult<()> {
        let render_area = vk::Rect2D {
            offset: vk::Offset2D { x: 0, y: 0 },
            extent: self.context.swapchain().extent(),
        };

        let mut recorder = CommandRecorder::new(self.command_buffers[frame], self.context.device().clone());
        recorder.reset()?;
        recorder.begin()?;
        {
            let _pass = recorder.begin_render_pass(
                self.targets.render_pass.handle(),
                self.targets.framebuffers[image_index as usize].handle(),
                render_area,
                &self.clear_values,
            )?;
        }
        recorder.end()?;
        Ok(())
    }

    fn recreate_swapchain(&mut self, window: &Window) -> VulkanResult<()> {
        let (width, height) = window.framebuffer_size();
        if width == 0 || height == 0 {
            // Minimized; try again once the window has a drawable area
            self.framebuffer_resized = true;
            return Ok(());
        }

        log::debug!("Recreating swapchain for {width}x{height}");

        self.context.wait_idle()?;
        self.targets.framebuffers.clear();
        self.context.recreate_swapchain(window)?;
        self.targets = FrameTargets::new(&self.context)?;
        self.images_in_flight = vec![vk::Fence::null(); self.context.swapchain().image_count()];
        self.framebuffer_resized = false;
        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if let Err(e) = self.context.wait_idle() {
            log::warn!("Device did not idle before renderer teardown: {e}");
        }
    }
}
