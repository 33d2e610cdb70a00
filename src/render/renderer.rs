//! Frame orchestration.
//!
//! [`Renderer::render_scene_graph`] walks the scene graph, moves every model
//! and light into camera space, then pushes each triangle through clipping,
//! lighting, projection, culling and rasterization.

use std::fmt;

use log::{debug, trace};

use super::framebuffer::{ImageBuffer, ZBuffer};
use super::rasterizer::{
    draw_triangle_wireframe, is_front_facing, project_triangle, raster_triangle, Viewport,
};
use crate::clipper::Frustum;
use crate::config::{RenderMode, RendererConfig};
use crate::light::{light_triangle, RenderLight, Shading};
use crate::math::{Scalar, Vec3};
use crate::scene::{GameObject, ModelObject, NodeId, SceneGraph};
use crate::transform::Transform;

/// Per-frame counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub models: usize,
    pub lights: usize,
    /// Mesh triangles entering the pipeline.
    pub triangles: usize,
    /// Triangles left after frustum clipping, or in front of the camera in
    /// wireframe mode.
    pub fragments: usize,
    pub culled: usize,
    pub pixels: usize,
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} models, {} lights, {} triangles -> {} clipped, {} culled, {} pixels",
            self.models, self.lights, self.triangles, self.fragments, self.culled, self.pixels
        )
    }
}

/// A model with its object-to-camera transform for this frame.
struct RenderItem<'a> {
    model: &'a ModelObject,
    to_camera: Transform,
}

pub struct Renderer {
    camera: NodeId,
    view_plane_z: Scalar,
    config: RendererConfig,
    viewport: Viewport,
    frustum: Frustum,
    image: ImageBuffer,
    zbuffer: ZBuffer,
    stats: RenderStats,
}

impl Renderer {
    /// Renderer looking through `camera`, with the view plane at
    /// `z = view_plane_z` in camera space.
    pub fn new(camera: NodeId, view_plane_z: Scalar, width: u32, height: u32) -> Self {
        Self::with_config(camera, view_plane_z, width, height, RendererConfig::default())
    }

    pub fn with_config(
        camera: NodeId,
        view_plane_z: Scalar,
        width: u32,
        height: u32,
        config: RendererConfig,
    ) -> Self {
        let viewport = Viewport::new(width, height);
        Self {
            camera,
            view_plane_z,
            config,
            viewport,
            frustum: Frustum::new(viewport.aspect_ratio(), view_plane_z, config.near_z),
            image: ImageBuffer::new(width, height),
            zbuffer: ZBuffer::new(width, height),
            stats: RenderStats::default(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        debug!("resizing renderer to {width}x{height}");
        self.viewport = Viewport::new(width, height);
        self.frustum = Frustum::new(
            self.viewport.aspect_ratio(),
            self.view_plane_z,
            self.config.near_z,
        );
        self.image = ImageBuffer::new(width, height);
        self.zbuffer = ZBuffer::new(width, height);
    }

    pub fn camera(&self) -> NodeId {
        self.camera
    }

    pub fn set_camera(&mut self, camera: NodeId) {
        self.camera = camera;
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.config.render_mode = mode;
    }

    pub fn width(&self) -> u32 {
        self.viewport.width()
    }

    pub fn height(&self) -> u32 {
        self.viewport.height()
    }

    /// The last rendered frame.
    pub fn image(&self) -> &ImageBuffer {
        &self.image
    }

    /// Counters of the last rendered frame.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Renders one frame of `graph` and returns the image.
    ///
    /// # Panics
    ///
    /// If the camera node is not part of `graph`.
    pub fn render_scene_graph(&mut self, graph: &SceneGraph) -> &ImageBuffer {
        self.image.fill(self.config.clear_color);
        self.stats = RenderStats::default();

        let camera_inverse = match graph.world_transform(self.camera) {
            Ok(world) => world.inverse(),
            Err(err) => panic!("camera node {} is not in the scene graph: {err}", self.camera),
        };
        let (items, lights) = collect_render_items(graph, &camera_inverse);
        self.stats.models = items.len();
        self.stats.lights = lights.len();

        for item in &items {
            match self.config.render_mode {
                RenderMode::Filled => self.render_item(item, &lights),
                RenderMode::Wireframe => self.render_item_wireframe(item),
            }
        }

        self.zbuffer.clear();
        debug!("frame: {}", self.stats);
        &self.image
    }

    fn render_item(&mut self, item: &RenderItem<'_>, lights: &[RenderLight]) {
        let model = item.model;
        let shading = Shading {
            ambient: self.config.ambient,
            view_direction: Vec3::FORWARD,
            specular_exponent: model.specular_exponent,
            ignore_specular: model.ignore_specular,
        };

        for mut triangle in model.mesh.triangles(model.normal_source()) {
            self.stats.triangles += 1;
            triangle.apply_transform(&item.to_camera);

            for mut fragment in self.frustum.clip(&triangle) {
                self.stats.fragments += 1;
                light_triangle(&mut fragment, &shading, lights);
                project_triangle(&mut fragment, self.view_plane_z);

                if self.config.backface_culling && !is_front_facing(&fragment) {
                    self.stats.culled += 1;
                    continue;
                }

                self.viewport.triangle_to_screen(&mut fragment);
                self.stats.pixels += raster_triangle(&fragment, &mut self.image, &mut self.zbuffer);
            }
        }
        trace!("rendered model `{}`", model.name);
    }

    fn render_item_wireframe(&mut self, item: &RenderItem<'_>) {
        let model = item.model;
        for mut triangle in model.mesh.triangles(model.normal_source()) {
            self.stats.triangles += 1;
            triangle.apply_transform(&item.to_camera);
            if triangle.vertices.iter().any(|v| v.position.z <= 0.0) {
                continue;
            }

            self.stats.fragments += 1;
            project_triangle(&mut triangle, self.view_plane_z);
            self.viewport.triangle_to_screen(&mut triangle);
            self.stats.pixels +=
                draw_triangle_wireframe(&triangle, self.config.wireframe_color, &mut self.image);
        }
        trace!("rendered model `{}` as wireframe", model.name);
    }
}

/// Models and lights of `graph` in breadth-first order, moved into the
/// camera space given by `camera_inverse`.
fn collect_render_items<'a>(
    graph: &'a SceneGraph,
    camera_inverse: &Transform,
) -> (Vec<RenderItem<'a>>, Vec<RenderLight>) {
    let mut items = Vec::new();
    let mut lights = Vec::new();

    for (id, node) in graph.breadth_first() {
        let Ok(world) = graph.world_transform(id) else {
            continue;
        };
        let to_camera = world.cumulate(camera_inverse);

        match node.object() {
            GameObject::Model(model) => items.push(RenderItem { model, to_camera }),
            GameObject::Light(light) => lights.push(RenderLight {
                position: to_camera.translation,
                color: light.color,
                falloff: light.falloff.clone(),
            }),
            GameObject::Empty { .. } | GameObject::Camera { .. } => {}
        }
    }
    (items, lights)
}
