//! Show the effective configuration.

use std::path::PathBuf;

use gazerig_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, explicit: Option<PathBuf>) -> anyhow::Result<()> {
    let path = explicit.unwrap_or_else(config_file_path);
    let source = if path.exists() {
        path.display().to_string()
    } else {
        "built-in defaults".to_string()
    };

    let (lo, hi) = config.blink.interval_bounds_ms();

    println!("Config: {source}");
    println!();
    println!("Gaze:");
    println!(
        "  Delay before response: {} ms",
        config.gaze.delay_before_response_ms
    );
    println!("  Follow speed: {}", config.gaze.follow_speed);
    println!("  Eye range: {}", config.gaze.eye_range);
    println!();
    println!("Blink:");
    println!("  Close percentage: {}", config.blink.close_percentage);
    println!(
        "  Interval: {} ms (jittered {:.0}..{:.0})",
        config.blink.time_between_blinks_ms, lo, hi
    );
    println!("  Duration: {} ms", config.blink.blink_duration_ms);
    println!("  First blink after: {} ms", config.blink.first_blink_delay_ms);
    println!();
    println!("Rig:");
    println!("  Left eye: {}", config.rig.left_eye_node);
    println!("  Right eye: {}", config.rig.right_eye_node);
    println!();
    println!("Simulation:");
    println!(
        "  {}x{} @ {}fps for {}s",
        config.simulation.surface_width,
        config.simulation.surface_height,
        config.simulation.fps,
        config.simulation.duration_secs
    );
    match config.simulation.seed {
        Some(seed) => println!("  Seed: {seed}"),
        None => println!("  Seed: random"),
    }
    Ok(())
}
