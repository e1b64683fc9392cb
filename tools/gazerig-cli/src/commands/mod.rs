pub mod info;
pub mod init;
pub mod script;
pub mod simulate;
pub mod validate;

use std::path::Path;

use gazerig_rig_model::rig::RigManifest;

/// Load a rig manifest, or the built-in character when no path is given.
pub fn load_rig(path: Option<&Path>) -> anyhow::Result<RigManifest> {
    match path {
        Some(path) => RigManifest::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load rig {}: {e}", path.display())),
        None => Ok(RigManifest::default_character()),
    }
}
