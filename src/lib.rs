//! A CPU software 3D renderer.
//!
//! Scenes are described by a [`SceneGraph`] of named nodes carrying models,
//! lights and cameras. Each frame the [`Renderer`] transforms every model
//! into camera space, lights it per vertex, clips it against the view
//! frustum, projects it and rasterizes it into an RGB image with a depth
//! buffer. SDL2 is only used, behind the `window` feature, to show frames.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use software3d::prelude::*;
//!
//! let mut graph = SceneGraph::new();
//! let camera = graph
//!     .add_child(ROOT_NAME, "camera", GameObject::camera("cam"), Transform::IDENTITY)
//!     .unwrap();
//! let cube = Arc::new(Mesh::cube(1.0, Vec3::from_rgb8(200, 40, 40)));
//! graph
//!     .add_child(
//!         ROOT_NAME,
//!         "cube",
//!         ModelObject::new("cube", cube).into(),
//!         Transform::from_translation(Vec3::new(0.0, 0.0, 3.0)),
//!     )
//!     .unwrap();
//!
//! let mut renderer = Renderer::new(camera, 1.0, 320, 240);
//! renderer.render_scene_graph(&graph).save_png("cube.png").unwrap();
//! ```

pub mod camera;
pub mod clipper;
pub mod config;
pub mod light;
pub mod math;
pub mod mesh;
pub mod render;
pub mod scene;
pub mod transform;
pub mod triangle;
#[cfg(feature = "window")]
pub mod window;

pub use camera::{CameraInput, CameraState};
pub use config::{RenderMode, RendererConfig};
pub use mesh::{Mesh, MeshError};
pub use render::{ImageBuffer, RenderStats, Renderer, ZBuffer};
pub use scene::{NodeId, SceneGraph, SceneGraphError};
pub use transform::Transform;
pub use triangle::Triangle;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use software3d::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::{CameraInput, CameraState};
    pub use crate::config::{RenderMode, RendererConfig};
    pub use crate::math::{Quaternion, Scalar, Vec3};
    pub use crate::mesh::{Mesh, MeshError};
    pub use crate::render::{ImageBuffer, RenderStats, Renderer};
    pub use crate::scene::{
        Falloff, GameObject, LightObject, ModelObject, NodeId, SceneGraph, SceneGraphError,
        ROOT_NAME,
    };
    pub use crate::transform::Transform;
}
