//! Translation of raw GLFW events into engine events

use glfw::{Action, Key, WindowEvent};

/// Window and input events the engine loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The user asked to close the window
    CloseRequested,
    /// The drawable area changed size
    FramebufferResized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
    /// The window was iconified (`true`) or restored (`false`)
    Minimized(bool),
    /// The window gained (`true`) or lost (`false`) input focus
    Focused(bool),
    /// A key went down
    KeyPressed(Key),
    /// A key went up
    KeyReleased(Key),
}

/// Map a GLFW event to an [`AppEvent`]; events the engine ignores map to `None`
pub fn translate(event: &WindowEvent) -> Option<AppEvent> {
    match *event {
        WindowEvent::Close => Some(AppEvent::CloseRequested),
        WindowEvent::FramebufferSize(width, height) => Some(AppEvent::FramebufferResized {
            width: u32::try_from(width).unwrap_or(0),
            height: u32::try_from(height).unwrap_or(0),
        }),
        WindowEvent::Iconify(minimized) => Some(AppEvent::Minimized(minimized)),
        WindowEvent::Focus(focused) => Some(AppEvent::Focused(focused)),
        WindowEvent::Key(key, _, Action::Press, _) => Some(AppEvent::KeyPressed(key)),
        WindowEvent::Key(key, _, Action::Release, _) => Some(AppEvent::KeyReleased(key)),
        // Repeats carry nothing the loop needs
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glfw::Modifiers;

    #[test]
    fn test_close_and_resize() {
        assert_eq!(translate(&WindowEvent::Close), Some(AppEvent::CloseRequested));
        assert_eq!(
            translate(&WindowEvent::FramebufferSize(1280, 720)),
            Some(AppEvent::FramebufferResized { width: 1280, height: 720 })
        );
    }

    #[test]
    fn test_negative_framebuffer_size_clamps_to_zero() {
        assert_eq!(
            translate(&WindowEvent::FramebufferSize(-1, 10)),
            Some(AppEvent::FramebufferResized { width: 0, height: 10 })
        );
    }

    #[test]
    fn test_key_actions() {
        let press = WindowEvent::Key(Key::Escape, 9, Action::Press, Modifiers::empty());
        let release = WindowEvent::Key(Key::Escape, 9, Action::Release, Modifiers::empty());
        let repeat = WindowEvent::Key(Key::Escape, 9, Action::Repeat, Modifiers::empty());

        assert_eq!(translate(&press), Some(AppEvent::KeyPressed(Key::Escape)));
        assert_eq!(translate(&release), Some(AppEvent::KeyReleased(Key::Escape)));
        assert_eq!(translate(&repeat), None);
    }

    #[test]
    fn test_focus_and_iconify() {
        assert_eq!(translate(&WindowEvent::Iconify(true)), Some(AppEvent::Minimized(true)));
        assert_eq!(translate(&WindowEvent::Focus(false)), Some(AppEvent::Focused(false)));
        assert_eq!(translate(&WindowEvent::Refresh), None);
    }
}
