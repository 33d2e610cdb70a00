//! Scene description: the node hierarchy and what hangs off it.

mod graph;
mod object;

pub use graph::{BreadthFirst, NodeId, SceneGraph, SceneGraphError, SceneGraphNode, ROOT_NAME};
pub use object::{Falloff, GameObject, LightObject, ModelObject};
