//! Write a default configuration file, and optionally a starter rig.

use std::path::{Path, PathBuf};

use gazerig_common::config::{config_file_path, AppConfig};
use gazerig_rig_model::rig::RigManifest;

pub fn run(output: Option<PathBuf>, rig: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = output.unwrap_or_else(config_file_path);
    write_files(&path, rig.as_deref(), force)?;

    println!("Wrote default config to {}", path.display());
    if let Some(rig) = &rig {
        println!("Wrote default character rig to {}", rig.display());
    }
    Ok(())
}

fn write_files(config_path: &Path, rig_path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    for path in std::iter::once(config_path).chain(rig_path) {
        if path.exists() && !force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
    }

    AppConfig::default()
        .save_to(config_path)
        .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;

    if let Some(rig_path) = rig_path {
        RigManifest::default_character()
            .save(rig_path)
            .map_err(|e| anyhow::anyhow!("Failed to write rig: {e}"))?;
    }
    Ok(())
}
