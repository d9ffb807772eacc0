//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the projection used for pixel-space drawing.

pub use nalgebra::{Matrix4, Vector4};

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Orthographic projection for Vulkan clip space
///
/// Maps `left..right` to NDC X `-1..1`, `top..bottom` to NDC Y `-1..1` (Vulkan's
/// Y axis points down) and `near..far` to depth `0..1`.
pub fn orthographic(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Mat4 {
    let width = right - left;
    let height = bottom - top;
    let depth = far - near;

    Mat4::new(
        2.0 / width, 0.0, 0.0, -(right + left) / width,
        0.0, 2.0 / height, 0.0, -(bottom + top) / height,
        0.0, 0.0, 1.0 / depth, -near / depth,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Pixel-space projection for a surface of the given size
///
/// Origin at the top-left corner, one unit per pixel, depth `-1..1`.
pub fn pixel_projection(width: u32, height: u32) -> Mat4 {
    // A minimized window reports 0x0; keep the matrix finite.
    #[allow(clippy::cast_precision_loss)] // Surface sizes stay far below 2^24
    let (width, height) = (width.max(1) as f32, height.max(1) as f32);
    orthographic(0.0, width, 0.0, height, -1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    fn project(m: &Mat4, x: f32, y: f32, z: f32) -> Vec4 {
        m * Vec4::new(x, y, z, 1.0)
    }

    #[test]
    fn test_pixel_projection_corners() {
        let m = pixel_projection(1920, 1080);

        let top_left = project(&m, 0.0, 0.0, 0.0);
        assert_relative_eq!(top_left.x, -1.0, epsilon = EPSILON);
        assert_relative_eq!(top_left.y, -1.0, epsilon = EPSILON);

        let bottom_right = project(&m, 1920.0, 1080.0, 0.0);
        assert_relative_eq!(bottom_right.x, 1.0, epsilon = EPSILON);
        assert_relative_eq!(bottom_right.y, 1.0, epsilon = EPSILON);

        let centre = project(&m, 960.0, 540.0, 0.0);
        assert_relative_eq!(centre.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(centre.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(centre.w, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_orthographic_depth_range() {
        let m = orthographic(0.0, 10.0, 0.0, 10.0, -1.0, 1.0);
        assert_relative_eq!(project(&m, 0.0, 0.0, -1.0).z, 0.0, epsilon = EPSILON);
        assert_relative_eq!(project(&m, 0.0, 0.0, 1.0).z, 1.0, epsilon = EPSILON);
        assert_relative_eq!(project(&m, 0.0, 0.0, 0.0).z, 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_zero_sized_surface_stays_finite() {
        let m = pixel_projection(0, 0);
        assert!(m.iter().all(|v| v.is_finite()));
    }
}
