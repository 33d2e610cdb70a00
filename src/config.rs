//! Renderer settings.

use image::Rgb;

use crate::math::{Scalar, Vec3};

/// How triangles reach the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Clipped, lit, culled and depth-tested solid triangles.
    #[default]
    Filled,
    /// Unlit triangle edges in [`RendererConfig::wireframe_color`]. Triangles
    /// with a vertex at or behind the camera are skipped instead of clipped,
    /// and nothing is culled or depth-tested.
    Wireframe,
}

/// Tunables for [`crate::render::Renderer`]. The defaults reproduce the
/// classic look: a dim grey ambient term, a near plane at `0.3` and a black
/// background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RendererConfig {
    /// Ambient light color, `0..=65535` per channel.
    pub ambient: Vec3,
    /// Camera-space depth of the near clipping plane.
    pub near_z: Scalar,
    pub clear_color: Rgb<u8>,
    pub backface_culling: bool,
    pub render_mode: RenderMode,
    pub wireframe_color: Rgb<u8>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            ambient: Vec3::from_rgb8(30, 30, 30),
            near_z: 0.3,
            clear_color: Rgb([0, 0, 0]),
            backface_culling: true,
            render_mode: RenderMode::Filled,
            wireframe_color: Rgb([255, 255, 255]),
        }
    }
}

impl RendererConfig {
    pub fn with_ambient(mut self, ambient: Vec3) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_near_z(mut self, near_z: Scalar) -> Self {
        self.near_z = near_z;
        self
    }

    pub fn with_clear_color(mut self, color: Rgb<u8>) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_backface_culling(mut self, enabled: bool) -> Self {
        self.backface_culling = enabled;
        self
    }

    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    pub fn with_wireframe_color(mut self, color: Rgb<u8>) -> Self {
        self.wireframe_color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RendererConfig::default();
        assert_eq!(config.ambient, Vec3::new(7710.0, 7710.0, 7710.0));
        assert_eq!(config.near_z, 0.3);
        assert!(config.backface_culling);
        assert_eq!(config.render_mode, RenderMode::Filled);
    }

    #[test]
    fn test_builders() {
        let config = RendererConfig::default()
            .with_near_z(1.0)
            .with_backface_culling(false)
            .with_clear_color(Rgb([1, 2, 3]))
            .with_render_mode(RenderMode::Wireframe)
            .with_wireframe_color(Rgb([0, 255, 0]));
        assert_eq!(config.render_mode, RenderMode::Wireframe);
        assert_eq!(config.wireframe_color, Rgb([0, 255, 0]));
        assert_eq!(config.near_z, 1.0);
        assert!(!config.backface_culling);
        assert_eq!(config.clear_color, Rgb([1, 2, 3]));
    }
}
