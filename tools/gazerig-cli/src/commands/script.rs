//! Generate a synthetic sweep pointer script.

use std::path::PathBuf;

use gazerig_common::clock::MonotonicClock;
use gazerig_common::config::AppConfig;
use gazerig_pointer_source::{PointerScriptWriter, SweepBackend, SweepConfig};
use gazerig_rig_model::event::PointerScriptHeader;

pub fn run(
    config: &AppConfig,
    output: PathBuf,
    duration_secs: f64,
    width: Option<u32>,
    height: Option<u32>,
) -> anyhow::Result<()> {
    let sweep = SweepConfig {
        surface_width: width.unwrap_or(config.simulation.surface_width),
        surface_height: height.unwrap_or(config.simulation.surface_height),
        duration_ms: MonotonicClock::secs_to_ms(duration_secs),
        ..Default::default()
    };
    let mut backend =
        SweepBackend::new(sweep.clone()).map_err(|e| anyhow::anyhow!("Invalid sweep: {e}"))?;

    let mut header = PointerScriptHeader::new(sweep.surface_width, sweep.surface_height);
    header.epoch_wall = MonotonicClock::start().epoch_wall().to_string();

    let mut writer = PointerScriptWriter::create(output, &header)?;
    let written = writer.write_all_from(&mut backend)?;

    println!(
        "Wrote {written} pointer events ({}x{}, {duration_secs}s) to {}",
        sweep.surface_width,
        sweep.surface_height,
        writer.path().display()
    );
    Ok(())
}
