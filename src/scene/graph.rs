//! Named transform hierarchy.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. A name
//! index gives O(1) lookup by name. World transforms are never cached: every
//! query walks from the node up to the root.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use thiserror::Error;

use super::object::GameObject;
use crate::math::{Mat3, Quaternion, Scalar};
use crate::transform::Transform;

/// Name of the root node every graph starts with.
pub const ROOT_NAME: &str = "world";
const ROOT_OBJECT_NAME: &str = "worldObj";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneGraphError {
    #[error("a node named `{0}` already exists")]
    DuplicateName(String),
    #[error("parent node `{0}` does not exist")]
    ParentNotFound(String),
    #[error("node `{0}` does not exist")]
    NodeNotFound(String),
    #[error("node {0} has been removed")]
    StaleNode(NodeId),
    #[error("the root node has no parent")]
    RootHasNoParent,
    #[error("the root node cannot be removed")]
    CannotRemoveRoot,
}

/// Handle to a node in a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct SceneGraphNode {
    name: String,
    parent: Option<NodeId>,
    /// Unordered; removal swaps the last child into the hole.
    children: Vec<NodeId>,
    local: Transform,
    object: GameObject,
}

impl SceneGraphNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Local-to-parent transform.
    pub fn local_transform(&self) -> &Transform {
        &self.local
    }

    pub fn object(&self) -> &GameObject {
        &self.object
    }
}

#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<Option<SceneGraphNode>>,
    names: HashMap<String, NodeId>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// A graph holding only the `"world"` root.
    pub fn new() -> Self {
        let root = SceneGraphNode {
            name: ROOT_NAME.to_string(),
            parent: None,
            children: Vec::new(),
            local: Transform::IDENTITY,
            object: GameObject::empty(ROOT_OBJECT_NAME),
        };
        let mut names = HashMap::new();
        names.insert(ROOT_NAME.to_string(), NodeId(0));
        Self {
            nodes: vec![Some(root)],
            names,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneGraphNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&SceneGraphNode> {
        self.node_id(name).and_then(|id| self.node(id))
    }

    /// Names of all live nodes, in no particular order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Attaches a new node under `parent`.
    pub fn add_child(
        &mut self,
        parent: &str,
        name: impl Into<String>,
        object: GameObject,
        local: Transform,
    ) -> Result<NodeId, SceneGraphError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(SceneGraphError::DuplicateName(name));
        }
        let parent_id = self
            .node_id(parent)
            .ok_or_else(|| SceneGraphError::ParentNotFound(parent.to_string()))?;

        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(SceneGraphNode {
            name: name.clone(),
            parent: Some(parent_id),
            children: Vec::new(),
            local,
            object,
        }));
        self.node_mut(parent_id)?.children.push(id);
        self.names.insert(name, id);
        Ok(id)
    }

    /// Removes a node and its whole subtree.
    pub fn remove(&mut self, name: &str) -> Result<(), SceneGraphError> {
        let id = self
            .node_id(name)
            .ok_or_else(|| SceneGraphError::NodeNotFound(name.to_string()))?;
        let parent = self.get(id)?.parent.ok_or(SceneGraphError::CannotRemoveRoot)?;

        let siblings = &mut self.node_mut(parent)?.children;
        if let Some(pos) = siblings.iter().position(|&c| c == id) {
            siblings.swap_remove(pos);
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes[next.0].take() {
                self.names.remove(&node.name);
                pending.extend(node.children);
            }
        }
        Ok(())
    }

    /// Root-to-node composition of local transforms.
    pub fn world_transform(&self, id: NodeId) -> Result<Transform, SceneGraphError> {
        let mut world = Transform::IDENTITY;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id)?;
            world = world.cumulate(&node.local);
            current = node.parent;
        }
        Ok(world)
    }

    pub fn set_local_transform(
        &mut self,
        id: NodeId,
        local: Transform,
    ) -> Result<(), SceneGraphError> {
        self.node_mut(id)?.local = local;
        Ok(())
    }

    /// Applies `t` after the node's local transform, in the parent's frame.
    pub fn cumulate_local(&mut self, id: NodeId, t: &Transform) -> Result<(), SceneGraphError> {
        let node = self.node_mut(id)?;
        node.local = node.local.cumulate(t);
        Ok(())
    }

    /// Applies `t` before the node's local transform.
    pub fn cumulate_before_local(
        &mut self,
        id: NodeId,
        t: &Transform,
    ) -> Result<(), SceneGraphError> {
        let node = self.node_mut(id)?;
        node.local = t.cumulate(&node.local);
        Ok(())
    }

    /// Moves the node by `t` expressed in world space, whatever its ancestors
    /// are doing.
    pub fn cumulate_world(&mut self, id: NodeId, t: &Transform) -> Result<(), SceneGraphError> {
        let parent = self.get(id)?.parent.ok_or(SceneGraphError::RootHasNoParent)?;
        let world = self.world_transform(id)?.cumulate(t);
        let parent_inverse = self.world_transform(parent)?.inverse();
        self.node_mut(id)?.local = world.cumulate(&parent_inverse);
        Ok(())
    }

    /// Replaces the local rotation with a yaw/pitch look direction (degrees).
    pub fn set_view_rotation(
        &mut self,
        id: NodeId,
        yaw: Scalar,
        pitch: Scalar,
    ) -> Result<(), SceneGraphError> {
        self.node_mut(id)?.local.rotation = Quaternion::from_euler(yaw, pitch, 0.0);
        Ok(())
    }

    /// World-space right, up and forward axes of the node.
    pub fn orientation(&self, id: NodeId) -> Result<Mat3, SceneGraphError> {
        Ok(self.world_transform(id)?.rotation.to_mat3())
    }

    /// Every node below the root, level by level.
    pub fn breadth_first(&self) -> BreadthFirst<'_> {
        let queue = self
            .node(self.root())
            .map(|root| root.children.iter().copied().collect())
            .unwrap_or_default();
        BreadthFirst { graph: self, queue }
    }

    fn get(&self, id: NodeId) -> Result<&SceneGraphNode, SceneGraphError> {
        self.node(id).ok_or(SceneGraphError::StaleNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneGraphNode, SceneGraphError> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(SceneGraphError::StaleNode(id))
    }

    fn write_subtree(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        writeln!(f, "{}{}: {}", "\t".repeat(depth), node.name, node.object.name())?;
        for &child in &node.children {
            self.write_subtree(f, child, depth + 1)?;
        }
        Ok(())
    }
}

/// Tab-indented dump of the tree, one `node: object` line per node.
impl fmt::Display for SceneGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_subtree(f, self.root(), 0)
    }
}

/// Breadth-first walk returned by [`SceneGraph::breadth_first`].
pub struct BreadthFirst<'a> {
    graph: &'a SceneGraph,
    queue: VecDeque<NodeId>,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = (NodeId, &'a SceneGraphNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.queue.pop_front() {
            if let Some(node) = self.graph.node(id) {
                self.queue.extend(node.children.iter().copied());
                return Some((id, node));
            }
        }
        None
    }
}
