//! Validate the config and check a rig's eye bindings.

use std::path::PathBuf;

use gazerig_common::config::AppConfig;
use gazerig_render_host::Scene;
use gazerig_rig_model::transform::TransformHost;

use super::load_rig;

pub fn run(config: &AppConfig, rig: Option<PathBuf>) -> anyhow::Result<()> {
    let mut issues = Vec::new();

    if let Err(e) = config.validate() {
        issues.push(format!("config: {e}"));
    }

    let manifest = load_rig(rig.as_deref())?;
    println!("Rig: {} ({} nodes)", manifest.name, manifest.nodes.len());

    let scene = Scene::from_manifest(&manifest)
        .map_err(|e| anyhow::anyhow!("Invalid rig manifest: {e}"))?;

    for (side, name) in [
        ("Left eye", &config.rig.left_eye_node),
        ("Right eye", &config.rig.right_eye_node),
    ] {
        match scene.find_node(name) {
            Some(id) => println!("  {side}: {name} (node {})", id.0),
            None => issues.push(format!("{side} node '{name}' not found in rig")),
        }
    }

    if issues.is_empty() {
        println!("\nConfig and rig are valid.");
        Ok(())
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        anyhow::bail!("{} issue(s) found", issues.len())
    }
}
