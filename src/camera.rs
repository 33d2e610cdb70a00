//! First-person control of a camera node.
//!
//! # Coordinate System
//!
//! Left-handed: +X right, +Y up, +Z forward. Yaw turns around +Y (positive
//! looks right), pitch around the camera's right axis (positive looks down).
//!
//! The camera itself is just a scene graph node. [`CameraState`] owns the
//! yaw/pitch angles between frames and turns one frame of [`CameraInput`]
//! into a new view rotation plus a world-space translation of that node.

use crate::math::{scalar, Scalar, Vec3};
use crate::scene::{NodeId, SceneGraph, SceneGraphError};
use crate::transform::Transform;

/// Keys held down during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraInput {
    pub forward: bool,
    pub back: bool,
    pub right: bool,
    pub left: bool,
    pub up: bool,
    pub down: bool,
    pub look_up: bool,
    pub look_down: bool,
    pub turn_right: bool,
    pub turn_left: bool,
}

impl CameraInput {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraState {
    /// Degrees.
    pub yaw: Scalar,
    /// Degrees, kept within `[-pitch_limit, pitch_limit]`.
    pub pitch: Scalar,
    /// World units per frame.
    pub move_step: Scalar,
    /// Degrees per frame.
    pub turn_step: Scalar,
    pub pitch_limit: Scalar,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl CameraState {
    pub fn new(yaw: Scalar, pitch: Scalar) -> Self {
        Self {
            yaw,
            pitch,
            move_step: 0.1,
            turn_step: 1.0,
            pitch_limit: 89.0,
        }
    }

    /// Applies one frame of input to `camera`.
    ///
    /// Forward and back movement follow the view direction flattened onto the
    /// ground plane; strafing follows the camera's right axis; up and down
    /// follow world up.
    pub fn apply(
        &mut self,
        graph: &mut SceneGraph,
        camera: NodeId,
        input: &CameraInput,
    ) -> Result<(), SceneGraphError> {
        let axes = graph.orientation(camera)?;
        let mut ahead = axes.forward();
        ahead.y = 0.0;
        let ahead = ahead.try_normalize().unwrap_or(Vec3::ZERO);
        let right = axes.right();

        let mut movement = Vec3::ZERO;
        if input.forward {
            movement += ahead * self.move_step;
        }
        if input.back {
            movement -= ahead * self.move_step;
        }
        if input.right {
            movement += right * self.move_step;
        }
        if input.left {
            movement -= right * self.move_step;
        }
        if input.up {
            movement += Vec3::UP * self.move_step;
        }
        if input.down {
            movement += Vec3::DOWN * self.move_step;
        }

        if input.look_up {
            self.pitch -= self.turn_step;
        }
        if input.look_down {
            self.pitch += self.turn_step;
        }
        if input.turn_right {
            self.yaw += self.turn_step;
        }
        if input.turn_left {
            self.yaw -= self.turn_step;
        }
        self.pitch = scalar::clamp(-self.pitch_limit, self.pitch_limit, self.pitch);

        graph.cumulate_world(camera, &Transform::from_translation(movement))?;
        graph.set_view_rotation(camera, self.yaw, self.pitch)
    }
}
