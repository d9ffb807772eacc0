//! CPU-side frame state machine
//!
//! A frame is cleared, then posted. A frame that cannot be drawn (minimized
//! window, stale swapchain) is skipped and its post does nothing. The
//! frame-in-flight slot only advances when a frame is actually submitted.

use super::vulkan::{VulkanError, VulkanResult};

/// Where the current frame is in its clear/post cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// No frame started
    Idle,
    /// Commands recorded for the given swapchain image
    Cleared {
        /// Acquired swapchain image
        image_index: u32,
    },
    /// Nothing to present this iteration
    Skipped,
}

/// Result of clearing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The frame was recorded and will be presented by `post`
    Cleared,
    /// The frame was not recorded; `post` will do nothing
    Skipped,
}

/// Tracks the frame state and the frame-in-flight slot
#[derive(Debug)]
pub struct FrameCycle {
    state: FrameState,
    current_frame: usize,
    frames_in_flight: usize,
}

impl FrameCycle {
    /// Start idle at slot 0; `frames_in_flight` must be at least 1
    pub fn new(frames_in_flight: usize) -> Self {
        Self {
            state: FrameState::Idle,
            current_frame: 0,
            frames_in_flight: frames_in_flight.max(1),
        }
    }

    /// Current state
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Frame-in-flight slot used by the frame being built
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Fail unless no frame is in progress
    pub fn ensure_idle(&self) -> VulkanResult<()> {
        if self.state == FrameState::Idle {
            Ok(())
        } else {
            Err(VulkanError::InvalidOperation {
                reason: format!("Frame already started ({:?}); post it first", self.state),
            })
        }
    }

    /// Record that the frame was cleared into `image_index`
    pub fn begin(&mut self, image_index: u32) -> VulkanResult<()> {
        self.ensure_idle()?;
        self.state = FrameState::Cleared { image_index };
        Ok(())
    }

    /// Record that this iteration draws nothing
    pub fn skip(&mut self) -> VulkanResult<()> {
        self.ensure_idle()?;
        self.state = FrameState::Skipped;
        Ok(())
    }

    /// Close the frame; returns the image to present, or `None` when it was skipped
    pub fn finish(&mut self) -> VulkanResult<Option<u32>> {
        match std::mem::replace(&mut self.state, FrameState::Idle) {
            FrameState::Cleared { image_index } => {
                self.current_frame = (self.current_frame + 1) % self.frames_in_flight;
                Ok(Some(image_index))
            }
            FrameState::Skipped => Ok(None),
            FrameState::Idle => Err(VulkanError::InvalidOperation {
                reason: "Post called without a cleared frame".to_string(),
            }),
        }
    }
}
