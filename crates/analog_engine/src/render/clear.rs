//! Clear colour and the clear values handed to the render pass

use ash::vk;
use serde::{Deserialize, Serialize};

/// Linear RGBA colour used to clear the colour attachment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearColor {
    /// Red, 0..=1
    pub r: f32,
    /// Green, 0..=1
    pub g: f32,
    /// Blue, 0..=1
    pub b: f32,
    /// Alpha, 0..=1
    pub a: f32,
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl ClearColor {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Opaque colour
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Every channel is a finite value in `0..=1`
    pub fn is_valid(&self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// As a Vulkan colour clear value
    pub fn to_vk(self) -> vk::ClearValue {
        vk::ClearValue {
            color: vk::ClearColorValue {
                float32: [self.r, self.g, self.b, self.a],
            },
        }
    }
}

/// Clear values for the colour (attachment 0) and depth/stencil (attachment 1) attachments
pub fn clear_values(color: ClearColor, depth: f32) -> [vk::ClearValue; 2] {
    [
        color.to_vk(),
        vk::ClearValue {
            depth_stencil: vk::ClearDepthStencilValue { depth, stencil: 0 },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_opaque_black() {
        let color = ClearColor::default();
        assert_eq!(color, ClearColor { r: 0.0, g: 0.0, b: 0.0, a: 1.0 });
        assert!(color.is_valid());
    }

    #[test]
    fn test_missing_channels_default_to_opaque_black() {
        let color: ClearColor = toml::from_str("r = 0.5").unwrap();
        assert_eq!(color, ClearColor::rgb(0.5, 0.0, 0.0));

        let color: ClearColor = ron::from_str("(b: 0.25, a: 0.5)").unwrap();
        assert_eq!(color, ClearColor { r: 0.0, g: 0.0, b: 0.25, a: 0.5 });
    }

    #[test]
    fn test_out_of_range_and_nan_rejected() {
        assert!(!ClearColor::rgb(1.5, 0.0, 0.0).is_valid());
        assert!(!ClearColor::rgb(0.0, -0.1, 0.0).is_valid());
        assert!(!ClearColor::rgb(0.0, 0.0, f32::NAN).is_valid());
    }

    #[test]
    fn test_clear_values_layout() {
        let values = clear_values(ClearColor::rgb(0.8, 0.3, 0.1), 1.0);
        let color = unsafe { values[0].color.float32 };
        let depth = unsafe { values[1].depth_stencil };

        assert_relative_eq!(color[0], 0.8);
        assert_relative_eq!(color[1], 0.3);
        assert_relative_eq!(color[2], 0.1);
        assert_relative_eq!(color[3], 1.0);
        assert_relative_eq!(depth.depth, 1.0);
        assert_eq!(depth.stencil, 0);
    }
}
