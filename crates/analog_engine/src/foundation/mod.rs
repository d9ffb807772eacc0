//! Foundation utilities shared by the window, renderer and engine loop

pub mod logging;
pub mod math;
pub mod time;
