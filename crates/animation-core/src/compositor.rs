//! Writes gaze and blink output into the bound eye nodes.
//!
//! Rest pose is captured once at bind time. Each frame:
//! - `position.xy = rest.position.xy + gaze` on both eyes (no per-eye divergence)
//! - `scale.z = rest.scale.y * (1 - closure)`
//!
//! The Y-to-Z pairing follows the character rig's local axis convention,
//! where the eyelid squash axis is the node's depth axis but the authored
//! rest magnitude lives in Y. A rig with matching axes needs a different
//! mapping here.

use gazerig_common::error::{GazerigError, GazerigResult};
use gazerig_rig_model::math::{Vec2, Vec3};
use gazerig_rig_model::transform::{NodeId, TransformHost};

/// A node handle plus its rest pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeBinding {
    pub node: NodeId,
    pub rest_position: Vec3,
    pub rest_scale: Vec3,
}

impl EyeBinding {
    fn resolve<H: TransformHost + ?Sized>(host: &H, name: &str) -> GazerigResult<Self> {
        let node = host
            .find_node(name)
            .ok_or_else(|| GazerigError::missing_node(name))?;
        let rest = host
            .transform(node)
            .ok_or_else(|| GazerigError::missing_node(name))?;
        Ok(Self {
            node,
            rest_position: rest.position,
            rest_scale: rest.scale,
        })
    }
}

/// Per-frame writer for the left and right eye nodes.
#[derive(Debug, Clone)]
pub struct Compositor {
    left: EyeBinding,
    right: EyeBinding,
}

impl Compositor {
    /// Resolve both eye nodes and capture their rest pose.
    ///
    /// Fails with [`GazerigError::MissingNode`] if either name is unknown.
    pub fn bind<H: TransformHost + ?Sized>(
        host: &H,
        left_name: &str,
        right_name: &str,
    ) -> GazerigResult<Self> {
        let left = EyeBinding::resolve(host, left_name)?;
        let right = EyeBinding::resolve(host, right_name)?;
        if left.node == right.node {
            return Err(GazerigError::rig(format!(
                "left and right eye resolve to the same node ('{left_name}', '{right_name}')"
            )));
        }
        tracing::debug!(left = left_name, right = right_name, "Eye nodes bound");
        Ok(Self { left, right })
    }

    /// Write this frame's values and mark both nodes dirty.
    pub fn apply<H: TransformHost + ?Sized>(&self, host: &mut H, gaze: Vec2, closure: f64) {
        for eye in [&self.left, &self.right] {
            let Some(transform) = host.transform_mut(eye.node) else {
                continue;
            };
            transform.position.x = eye.rest_position.x + gaze.x;
            transform.position.y = eye.rest_position.y + gaze.y;
            transform.scale.z = eye.rest_scale.y * (1.0 - closure);
            host.mark_dirty(eye.node);
        }
    }

    pub fn left(&self) -> &EyeBinding {
        &self.left
    }

    pub fn right(&self) -> &EyeBinding {
        &self.right
    }
}
