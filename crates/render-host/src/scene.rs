//! Flat scene graph of named transform nodes.

use std::collections::HashMap;

use gazerig_common::error::{GazerigError, GazerigResult};
use gazerig_rig_model::rig::RigManifest;
use gazerig_rig_model::transform::{NodeId, Transform, TransformHost};

#[derive(Debug, Clone)]
struct Node {
    name: String,
    local: Transform,
    world: Transform,
    dirty: bool,
}

/// Owns every node a character rig writes into.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    by_name: HashMap<String, NodeId>,
    invalidations: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene with one node per manifest entry, at rest pose.
    pub fn from_manifest(manifest: &RigManifest) -> GazerigResult<Self> {
        manifest.validate()?;
        let mut scene = Self::new();
        for spec in &manifest.nodes {
            scene.add_node(&spec.name, spec.rest_transform())?;
        }
        tracing::debug!(rig = %manifest.name, nodes = scene.node_count(), "Scene built");
        Ok(scene)
    }

    /// Add a node. Names must be unique.
    pub fn add_node(&mut self, name: &str, transform: Transform) -> GazerigResult<NodeId> {
        if self.by_name.contains_key(name) {
            return Err(GazerigError::rig(format!("duplicate node name '{name}'")));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            local: transform,
            world: transform,
            dirty: false,
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).map(|n| n.name.as_str())
    }

    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(|n| n.dirty)
    }

    /// Total `mark_dirty` calls since construction.
    pub fn invalidation_count(&self) -> u64 {
        self.invalidations
    }

    /// Last evaluated world transform of a node.
    pub fn world_transform(&self, id: NodeId) -> Option<&Transform> {
        self.nodes.get(id.0).map(|n| &n.world)
    }

    /// Re-evaluate dirty nodes and clear their flags. Returns how many
    /// nodes were evaluated.
    ///
    /// Nodes are unparented, so the world transform is the local one.
    pub fn evaluate_world_transforms(&mut self) -> usize {
        let mut evaluated = 0;
        for node in self.nodes.iter_mut().filter(|n| n.dirty) {
            node.world = node.local;
            node.dirty = false;
            evaluated += 1;
        }
        evaluated
    }
}

impl TransformHost for Scene {
    fn find_node(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.nodes.get(id.0).map(|n| &n.local)
    }

    fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id.0).map(|n| &mut n.local)
    }

    fn mark_dirty(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.dirty = true;
            self.invalidations += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazerig_rig_model::math::Vec3;

    #[test]
    fn test_from_manifest_preserves_order_and_rest_pose() {
        let manifest = RigManifest::default_character();
        let scene = Scene::from_manifest(&manifest).unwrap();
        assert_eq!(scene.node_count(), manifest.nodes.len());
        for (i, spec) in manifest.nodes.iter().enumerate() {
            let id = scene.find_node(&spec.name).unwrap();
            assert_eq!(id, NodeId(i));
            assert_eq!(scene.node_name(id), Some(spec.name.as_str()));
            assert_eq!(scene.transform(id), Some(&spec.rest_transform()));
        }
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut scene = Scene::new();
        scene.add_node("Eye", Transform::default()).unwrap();
        assert!(scene.add_node("Eye", Transform::default()).is_err());
    }

    #[test]
    fn test_world_pass_clears_dirty_flags() {
        let mut scene = Scene::new();
        let a = scene.add_node("A", Transform::default()).unwrap();
        let b = scene.add_node("B", Transform::default()).unwrap();

        scene.transform_mut(a).unwrap().position = Vec3::new(1.0, 2.0, 3.0);
        scene.mark_dirty(a);
        scene.mark_dirty(a);
        assert!(scene.is_dirty(a));
        assert!(!scene.is_dirty(b));
        assert_eq!(scene.invalidation_count(), 2);
        // Not yet evaluated.
        assert_eq!(scene.world_transform(a).unwrap().position, Vec3::ZERO);

        assert_eq!(scene.evaluate_world_transforms(), 1);
        assert!(!scene.is_dirty(a));
        assert_eq!(
            scene.world_transform(a).unwrap().position,
            Vec3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(scene.evaluate_world_transforms(), 0);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut scene = Scene::new();
        scene.mark_dirty(NodeId(7));
        assert_eq!(scene.invalidation_count(), 0);
        assert!(scene.transform(NodeId(7)).is_none());
        assert!(!scene.is_dirty(NodeId(7)));
    }
}
