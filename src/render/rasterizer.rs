//! Screen-space stages of the pipeline.
//!
//! A camera-space triangle that survived clipping goes through:
//!
//! 1. [`project_triangle`]: perspective divide onto the view plane at
//!    `z = view_plane_z`. The camera-space depth is kept in `z`.
//! 2. [`is_front_facing`]: clockwise triangles face the viewer. After the
//!    divide their surface normal points towards `-Z`.
//! 3. [`Viewport::to_screen`]: view-plane units to pixels. The view plane
//!    spans `[-aspect, aspect] x [-1, 1]`; row 0 is the top of the image.
//! 4. [`raster_triangle`]: bounding-box walk with barycentric weights
//!    sampled at pixel centres, depth tested against a [`ZBuffer`].
//!
//! # Barycentric weights
//!
//! For pixel centre `P` the weights come from the signed-area form
//!
//! ```text
//! den = (y1 - y2)(x0 - x2) + (x2 - x1)(y0 - y2)
//! w0  = ((y1 - y2)(Px - x2) + (x2 - x1)(Py - y2)) / den
//! w1  = ((y2 - y0)(Px - x2) + (x0 - x2)(Py - y2)) / den
//! w2  = 1 - w0 - w1
//! ```
//!
//! A pixel is covered when no weight is negative. Degenerate triangles
//! produce non-finite weights and draw nothing.
//!
//! Wireframes skip clipping against the frustum: [`draw_line`] clips each
//! edge to the image rectangle and walks it with Bresenham.

use image::Rgb;

use super::framebuffer::{ImageBuffer, ZBuffer};
use crate::math::interpolation::{find_weights_2d, interpolate3};
use crate::math::{Scalar, Vec3};
use crate::triangle::Triangle;

/// Pixel dimensions and the derived constants the screen mapping needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    aspect_ratio: Scalar,
    half_width: Scalar,
    half_height: Scalar,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (Scalar::from(width), Scalar::from(height));
        Self {
            width,
            height,
            aspect_ratio: w / h,
            half_width: w / 2.0,
            half_height: h / 2.0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> Scalar {
        self.aspect_ratio
    }

    /// Maps a view-plane point to pixel coordinates, keeping `z`.
    #[inline]
    pub fn to_screen(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            (p.x + self.aspect_ratio) * self.half_width / self.aspect_ratio,
            (1.0 - p.y) * self.half_height,
            p.z,
        )
    }

    pub fn triangle_to_screen(&self, triangle: &mut Triangle) {
        for vertex in &mut triangle.vertices {
            vertex.position = self.to_screen(vertex.position);
        }
    }
}

/// Perspective divide of a camera-space point onto the plane `z = view_plane_z`.
#[inline]
pub fn project_point(p: Vec3, view_plane_z: Scalar) -> Vec3 {
    debug_assert!(p.z > 0.0, "projecting a point at or behind the camera: {p:?}");
    let k = view_plane_z / p.z;
    Vec3::new(p.x * k, p.y * k, p.z)
}

pub fn project_triangle(triangle: &mut Triangle, view_plane_z: Scalar) {
    for vertex in &mut triangle.vertices {
        vertex.position = project_point(vertex.position, view_plane_z);
    }
}

/// True when a projected triangle is wound clockwise as seen by the camera.
#[inline]
pub fn is_front_facing(projected: &Triangle) -> bool {
    Vec3::BACK.dot(projected.surface_normal()) > 0.0
}

/// Fills a screen-space triangle. Returns the number of pixels written.
pub fn raster_triangle(triangle: &Triangle, image: &mut ImageBuffer, zbuffer: &mut ZBuffer) -> usize {
    let [p0, p1, p2] = triangle.positions();
    let [c0, c1, c2] = triangle.vertices.map(|v| v.color);

    let width = Scalar::from(image.width().min(zbuffer.width()));
    let height = Scalar::from(image.height().min(zbuffer.height()));
    let min_x = p0.x.min(p1.x).min(p2.x).floor().clamp(0.0, width) as u32;
    let max_x = p0.x.max(p1.x).max(p2.x).ceil().clamp(0.0, width) as u32;
    let min_y = p0.y.min(p1.y).min(p2.y).floor().clamp(0.0, height) as u32;
    let max_y = p0.y.max(p1.y).max(p2.y).ceil().clamp(0.0, height) as u32;

    let mut written = 0;
    for y in min_y..max_y {
        for x in min_x..max_x {
            let centre = Vec3::new(Scalar::from(x) + 0.5, Scalar::from(y) + 0.5, 0.0);
            let weights = find_weights_2d(p0, p1, p2, centre);
            if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                continue;
            }

            let depth = interpolate3(p0, p1, p2, weights).z;
            if depth < 0.0 || !zbuffer.test_and_set(x, y, depth) {
                continue;
            }

            let color = interpolate3(c0, c1, c2, weights);
            image.set(x, y, Rgb(color.to_rgb8()));
            written += 1;
        }
    }
    written
}

/// Draws the three edges of a screen-space triangle. Returns the number of
/// pixels written.
pub fn draw_triangle_wireframe(triangle: &Triangle, color: Rgb<u8>, image: &mut ImageBuffer) -> usize {
    let [p0, p1, p2] = triangle.positions();
    draw_line(p0, p1, color, image) + draw_line(p1, p2, color, image) + draw_line(p2, p0, color, image)
}

/// Draws the screen-space segment `p0..p1`, ignoring `z`. Only the part
/// inside the image is walked. Returns the number of pixels written.
pub fn draw_line(p0: Vec3, p1: Vec3, color: Rgb<u8>, image: &mut ImageBuffer) -> usize {
    let (width, height) = (image.width(), image.height());
    let Some((a, b)) = clip_line_to_rect(p0, p1, Scalar::from(width), Scalar::from(height)) else {
        return 0;
    };

    let (mut x, mut y) = (a.x.floor() as i64, a.y.floor() as i64);
    let (x1, y1) = (b.x.floor() as i64, b.y.floor() as i64);
    let dx = (x1 - x).abs();
    let dy = (y1 - y).abs();
    let step_x = if x < x1 { 1 } else { -1 };
    let step_y = if y < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut written = 0;
    loop {
        // clipped endpoints may sit exactly on the far edges
        if (0..i64::from(width)).contains(&x) && (0..i64::from(height)).contains(&y) {
            image.set(x as u32, y as u32, color);
            written += 1;
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += step_x;
        }
        if e2 < dx {
            err += dx;
            y += step_y;
        }
    }
    written
}

/// Liang-Barsky clip of `p0..p1` to `[0, width] x [0, height]`.
fn clip_line_to_rect(p0: Vec3, p1: Vec3, width: Scalar, height: Scalar) -> Option<(Vec3, Vec3)> {
    if !p0.is_finite() || !p1.is_finite() {
        return None;
    }
    let d = p1 - p0;
    let (mut t0, mut t1): (Scalar, Scalar) = (0.0, 1.0);
    for (p, q) in [(-d.x, p0.x), (d.x, width - p0.x), (-d.y, p0.y), (d.y, height - p0.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((p0 + d * t0, p0 + d * t1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn screen_triangle(points: [[Scalar; 3]; 3], color: Vec3) -> Triangle {
        Triangle::new(points.map(|[x, y, z]| Vec3::new(x, y, z)), [color; 3])
    }

    #[test]
    fn test_projection_keeps_depth() {
        let p = project_point(Vec3::new(2.0, -1.0, 4.0), 2.0);
        assert_relative_eq!(p, Vec3::new(1.0, -0.5, 4.0));
    }

    #[test]
    fn test_screen_mapping_corners() {
        let viewport = Viewport::new(200, 100);
        assert_relative_eq!(viewport.aspect_ratio(), 2.0);
        assert_relative_eq!(viewport.to_screen(Vec3::new(-2.0, 1.0, 3.0)), Vec3::new(0.0, 0.0, 3.0));
        assert_relative_eq!(viewport.to_screen(Vec3::new(2.0, -1.0, 3.0)), Vec3::new(200.0, 100.0, 3.0));
        assert_relative_eq!(viewport.to_screen(Vec3::ZERO), Vec3::new(100.0, 50.0, 0.0));
    }

    #[test]
    fn test_clockwise_triangle_faces_camera() {
        // clockwise when viewed from -Z towards +Z
        let front = screen_triangle([[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0]], Vec3::ZERO);
        let back = screen_triangle([[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]], Vec3::ZERO);
        assert!(is_front_facing(&front));
        assert!(!is_front_facing(&back));
    }

    #[test]
    fn test_raster_covers_pixel_centres_inside() {
        let mut image = ImageBuffer::new(8, 8);
        let mut zbuffer = ZBuffer::new(8, 8);
        let white = Vec3::from_rgb8(255, 255, 255);
        let t = screen_triangle([[0.0, 0.0, 1.0], [8.0, 0.0, 1.0], [0.0, 8.0, 1.0]], white);

        let written = raster_triangle(&t, &mut image, &mut zbuffer);
        // pixel (x, y) is covered when x + y + 1 <= 8
        assert_eq!(written, 36);
        assert_eq!(image.get(0, 0), Some(Rgb([255, 255, 255])));
        assert_eq!(image.get(6, 1), Some(Rgb([255, 255, 255])));
        assert_eq!(image.get(7, 1), Some(Rgb([0, 0, 0])));
        assert_relative_eq!(zbuffer.get(3, 3), 1.0);
        assert_eq!(zbuffer.get(7, 7), Scalar::INFINITY);
    }

    #[test]
    fn test_depth_test_keeps_nearest() {
        let mut image = ImageBuffer::new(4, 4);
        let mut zbuffer = ZBuffer::new(4, 4);
        let near = screen_triangle(
            [[0.0, 0.0, 1.0], [8.0, 0.0, 1.0], [0.0, 8.0, 1.0]],
            Vec3::from_rgb8(255, 0, 0),
        );
        let far = screen_triangle(
            [[0.0, 0.0, 2.0], [8.0, 0.0, 2.0], [0.0, 8.0, 2.0]],
            Vec3::from_rgb8(0, 0, 255),
        );

        raster_triangle(&near, &mut image, &mut zbuffer);
        assert_eq!(raster_triangle(&far, &mut image, &mut zbuffer), 0);
        assert_eq!(image.get(1, 1), Some(Rgb([255, 0, 0])));
    }

    #[test]
    fn test_bounding_box_is_clamped_to_viewport() {
        let mut image = ImageBuffer::new(4, 4);
        let mut zbuffer = ZBuffer::new(4, 4);
        let huge = screen_triangle(
            [[-100.0, -100.0, 1.0], [300.0, -100.0, 1.0], [-100.0, 300.0, 1.0]],
            Vec3::from_rgb8(10, 20, 30),
        );
        assert_eq!(raster_triangle(&huge, &mut image, &mut zbuffer), 16);
    }

    #[test]
    fn test_degenerate_and_negative_depth_draw_nothing() {
        let mut image = ImageBuffer::new(4, 4);
        let mut zbuffer = ZBuffer::new(4, 4);
        let white = Vec3::from_rgb8(255, 255, 255);
        let line = screen_triangle([[0.0, 0.0, 1.0], [2.0, 2.0, 1.0], [4.0, 4.0, 1.0]], white);
        let behind = screen_triangle([[0.0, 0.0, -1.0], [8.0, 0.0, -1.0], [0.0, 8.0, -1.0]], white);
        assert_eq!(raster_triangle(&line, &mut image, &mut zbuffer), 0);
        assert_eq!(raster_triangle(&behind, &mut image, &mut zbuffer), 0);
    }

    #[test]
    fn test_line_covers_both_endpoints() {
        let mut image = ImageBuffer::new(8, 8);
        let red = Rgb([255, 0, 0]);
        assert_eq!(draw_line(Vec3::new(1.5, 2.5, 1.0), Vec3::new(6.5, 2.5, 1.0), red, &mut image), 6);
        assert_eq!(image.get(1, 2), Some(red));
        assert_eq!(image.get(6, 2), Some(red));
        assert_eq!(image.get(7, 2), Some(Rgb([0, 0, 0])));

        // steep diagonal, drawn backwards
        assert_eq!(draw_line(Vec3::new(4.5, 7.5, 1.0), Vec3::new(0.5, 3.5, 1.0), red, &mut image), 5);
        assert_eq!(image.get(2, 5), Some(red));
    }

    #[test]
    fn test_line_is_clipped_to_image() {
        let mut image = ImageBuffer::new(4, 4);
        let white = Rgb([255, 255, 255]);
        // crosses the whole image horizontally from far outside
        let far = draw_line(Vec3::new(-1e9, 1.5, 1.0), Vec3::new(1e9, 1.5, 1.0), white, &mut image);
        assert_eq!(far, 4);
        assert_eq!(draw_line(Vec3::new(-5.0, -5.0, 1.0), Vec3::new(-1.0, 10.0, 1.0), white, &mut image), 0);
        let nan = Vec3::new(Scalar::NAN, 0.0, 1.0);
        assert_eq!(draw_line(nan, Vec3::new(2.0, 2.0, 1.0), white, &mut image), 0);
    }

    #[test]
    fn test_wireframe_leaves_interior_empty() {
        let mut image = ImageBuffer::new(10, 10);
        let white = Rgb([255, 255, 255]);
        let t = screen_triangle([[1.5, 1.5, 1.0], [8.5, 1.5, 1.0], [1.5, 8.5, 1.0]], Vec3::ZERO);
        assert!(draw_triangle_wireframe(&t, white, &mut image) > 0);
        assert_eq!(image.get(1, 1), Some(white));
        assert_eq!(image.get(8, 1), Some(white));
        assert_eq!(image.get(1, 8), Some(white));
        assert_eq!(image.get(3, 3), Some(Rgb([0, 0, 0])));
    }
}
