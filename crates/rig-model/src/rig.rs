//! Rig manifests: the named nodes of a character and their rest pose.
//!
//! A manifest is what the host builds its scene from before any animation
//! is bound. Only position and scale are described.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use gazerig_common::error::{GazerigError, GazerigResult};

use crate::math::Vec3;
use crate::transform::Transform;

/// Top-level rig file (`rig.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigManifest {
    /// Human-readable character name.
    pub name: String,

    /// Nodes in declaration order.
    pub nodes: Vec<NodeSpec>,
}

/// One named node and its rest transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,

    #[serde(default)]
    pub position: Vec3,

    #[serde(default = "unit_scale")]
    pub scale: Vec3,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl NodeSpec {
    pub fn new(name: impl Into<String>, position: Vec3, scale: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            scale,
        }
    }

    /// Rest transform described by this spec.
    pub fn rest_transform(&self) -> Transform {
        Transform::new(self.position, self.scale)
    }
}

impl RigManifest {
    /// Built-in character: a head with two eyes slightly in front of it.
    pub fn default_character() -> Self {
        Self {
            name: "default-character".to_string(),
            nodes: vec![
                NodeSpec::new("Head", Vec3::new(0.0, 1.6, 0.0), Vec3::ONE),
                NodeSpec::new(
                    "LeftEye",
                    Vec3::new(-0.032, 1.68, 0.09),
                    Vec3::new(1.0, 1.0, 1.0),
                ),
                NodeSpec::new(
                    "RightEye",
                    Vec3::new(0.032, 1.68, 0.09),
                    Vec3::new(1.0, 1.0, 1.0),
                ),
            ],
        }
    }

    /// Load a manifest from a JSON file.
    pub fn load(path: &Path) -> GazerigResult<Self> {
        if !path.exists() {
            return Err(GazerigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let manifest: RigManifest = serde_json::from_str(&content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Save the manifest as pretty JSON.
    pub fn save(&self, path: &Path) -> GazerigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Check that node names are present and unique and all values are finite.
    pub fn validate(&self) -> GazerigResult<()> {
        if self.nodes.is_empty() {
            return Err(GazerigError::rig(format!("rig '{}' has no nodes", self.name)));
        }

        let mut seen = HashSet::new();
        for node in &self.nodes {
            if node.name.trim().is_empty() {
                return Err(GazerigError::rig("node with empty name"));
            }
            if !seen.insert(node.name.as_str()) {
                return Err(GazerigError::rig(format!(
                    "duplicate node name '{}'",
                    node.name
                )));
            }
            if !node.position.is_finite() || !node.scale.is_finite() {
                return Err(GazerigError::rig(format!(
                    "node '{}' has a non-finite rest transform",
                    node.name
                )));
            }
        }
        Ok(())
    }

    /// Find a node spec by name.
    pub fn node(&self, name: &str) -> Option<&NodeSpec> {
        self.nodes.iter().find(|n| n.name == name)
    }
}
