//! Per-vertex Phong lighting.
//!
//! Colors are in the `0..=65535` channel range. Every light contributes a
//! diffuse term scaled by its falloff and, unless disabled, a specular term
//! built from the halfway vector between the light and the viewer.

use crate::math::interpolation::nlerp;
use crate::math::{Scalar, Vec3};
use crate::scene::Falloff;
use crate::triangle::{Triangle, Vertex};

/// A light resolved into the space the triangles are lit in.
#[derive(Clone, Debug)]
pub struct RenderLight {
    pub position: Vec3,
    pub color: Vec3,
    pub falloff: Falloff,
}

/// Material and view parameters shared by every vertex of a model.
#[derive(Clone, Copy, Debug)]
pub struct Shading {
    pub ambient: Vec3,
    /// Direction the viewer looks along.
    pub view_direction: Vec3,
    pub specular_exponent: Scalar,
    pub ignore_specular: bool,
}

pub fn light_triangle(triangle: &mut Triangle, shading: &Shading, lights: &[RenderLight]) {
    for vertex in &mut triangle.vertices {
        light_vertex(vertex, shading, lights);
    }
}

/// Replaces the vertex color with its lit color.
pub fn light_vertex(vertex: &mut Vertex, shading: &Shading, lights: &[RenderLight]) {
    let base = vertex.color;
    let normal = vertex.normal.try_normalize().unwrap_or(vertex.normal);
    let mut color = base.mul_components(shading.ambient) / Vec3::COLOR_MAX;

    for light in lights {
        let to_light = light.position - vertex.position;
        let distance = to_light.magnitude();
        let Some(direction) = to_light.try_normalize() else {
            continue;
        };
        let intensity = light.falloff.evaluate(distance);

        let diffuse = normal.dot(direction).max(0.0);
        color += base.mul_components(light.color * intensity) * diffuse / Vec3::COLOR_MAX;

        if !shading.ignore_specular {
            let halfway = nlerp(-shading.view_direction, direction, 0.5);
            let specular = normal.dot(halfway).max(0.0).powf(shading.specular_exponent);
            color += light.color * specular;
        }
    }

    vertex.color = color.clamp(0.0, Vec3::COLOR_MAX);
}
