//! Transform nodes and the host seam the animation core writes through.
//!
//! The core never owns scene nodes. It resolves handles by name once,
//! reads their rest pose once, and writes derived values every frame.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Opaque handle to a node owned by a [`TransformHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Local position and scale of a node. Rotation is not animated here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Self { position, scale }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Anything that owns named, mutable transform nodes.
pub trait TransformHost {
    /// Resolve a node by name.
    fn find_node(&self, name: &str) -> Option<NodeId>;

    /// Current local transform of a node.
    fn transform(&self, id: NodeId) -> Option<&Transform>;

    /// Mutable access to a node's local transform.
    fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform>;

    /// Tell the host the node's transform changed and must be re-evaluated.
    fn mark_dirty(&mut self, id: NodeId);
}
