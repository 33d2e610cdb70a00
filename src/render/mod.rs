//! Rasterization and frame output.

mod framebuffer;
mod rasterizer;
mod renderer;

pub use framebuffer::{ImageBuffer, ZBuffer};
pub use rasterizer::{
    draw_line, draw_triangle_wireframe, is_front_facing, project_point, project_triangle,
    raster_triangle, Viewport,
};
pub use renderer::{RenderStats, Renderer};
