//! Run the headless frame loop with a loaded character.

use std::path::PathBuf;
use std::time::Duration;

use gazerig_animation_core::animator::AnimationSettings;
use gazerig_common::clock::{frame_interval_ms, Clock, ManualClock, MonotonicClock, TimestampMs};
use gazerig_common::config::AppConfig;
use gazerig_pointer_source::{PointerBackend, ScriptedBackend, SweepBackend, SweepConfig};
use gazerig_render_host::{
    FrameLoop, FrameRecorder, FrameSample, LoadedCharacter, PointerSurface, Scene,
};
use gazerig_rig_model::math::Vec2;

use super::load_rig;

pub struct SimulateArgs {
    pub rig: Option<PathBuf>,
    pub pointer: Option<PathBuf>,
    pub frames: Option<u64>,
    pub duration: Option<f64>,
    pub fps: Option<u32>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub realtime: bool,
}

/// End-of-run statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub frames: u64,
    pub blinks: u64,
    pub peak_closure: f64,
    pub final_gaze: Vec2,
    pub pointer_events: u64,
}

/// Everything one simulation run owns.
struct Session {
    scene: Scene,
    frame_loop: FrameLoop,
    character: LoadedCharacter,
    backend: Box<dyn PointerBackend>,
    surface: PointerSurface,
    recorder: Option<FrameRecorder>,
    peak_closure: f64,
    pointer_events: u64,
}

impl Session {
    fn new(
        config: &AppConfig,
        args: &SimulateArgs,
        duration_ms: TimestampMs,
    ) -> anyhow::Result<Self> {
        let manifest = load_rig(args.rig.as_deref())?;
        let scene = Scene::from_manifest(&manifest)?;

        let mut settings = AnimationSettings::from(config);
        if args.seed.is_some() {
            settings.seed = args.seed;
        }

        let (backend, surface): (Box<dyn PointerBackend>, PointerSurface) = match &args.pointer {
            Some(path) => {
                let scripted = ScriptedBackend::from_file(path)?;
                let surface = match scripted.header() {
                    Some(header) => PointerSurface::from_header(header)?,
                    None => PointerSurface::new(
                        config.simulation.surface_width,
                        config.simulation.surface_height,
                    )?,
                };
                (Box::new(scripted), surface)
            }
            None => {
                let sweep = SweepBackend::new(SweepConfig {
                    surface_width: config.simulation.surface_width,
                    surface_height: config.simulation.surface_height,
                    duration_ms,
                    ..Default::default()
                })?;
                let surface = PointerSurface::new(
                    sweep.config().surface_width,
                    sweep.config().surface_height,
                )?;
                (Box::new(sweep), surface)
            }
        };

        let recorder = args.output.clone().map(FrameRecorder::create).transpose()?;

        let mut frame_loop = FrameLoop::new();
        let character = LoadedCharacter::load(&scene, &mut frame_loop, &settings, 0.0)?;

        tracing::info!(
            rig = %manifest.name,
            pointer = backend.name(),
            width = surface.width(),
            height = surface.height(),
            "Simulation ready"
        );

        Ok(Self {
            scene,
            frame_loop,
            character,
            backend,
            surface,
            recorder,
            peak_closure: 0.0,
            pointer_events: 0,
        })
    }

    /// Deliver pending pointer input, then render one frame at `now`.
    fn step(&mut self, now: TimestampMs) -> anyhow::Result<()> {
        for event in self.backend.poll(now)? {
            let input = self.surface.to_input(&event);
            self.character.pointer(input, event.t);
            self.pointer_events += 1;
        }

        let info = self.frame_loop.render_frame(&mut self.scene, now);
        let output = self.character.last_output();
        self.peak_closure = self.peak_closure.max(output.closure);

        if let Some(recorder) = self.recorder.as_mut() {
            let (left, right) = {
                let animator = self.character.animator();
                (
                    animator.compositor().left().node,
                    animator.compositor().right().node,
                )
            };
            let sample = FrameSample::capture(&info, &output, &self.scene, left, right)?;
            recorder.record(&sample)?;
        }
        Ok(())
    }

    /// Fixed-step run on a manually advanced clock.
    fn run_fixed(&mut self, frames: u64, interval_ms: f64) -> anyhow::Result<()> {
        let clock = ManualClock::new(0.0);
        for _ in 0..frames {
            self.step(clock.now_ms())?;
            clock.advance(interval_ms);
        }
        Ok(())
    }

    /// Wall-clock paced run. Stops early on Ctrl-C.
    async fn run_realtime(&mut self, frames: u64, interval_ms: f64) -> anyhow::Result<()> {
        let clock = MonotonicClock::start();
        let mut ticker = tokio::time::interval(Duration::from_secs_f64(interval_ms / 1_000.0));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        for _ in 0..frames {
            tokio::select! {
                _ = ticker.tick() => self.step(clock.now_ms())?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    break;
                }
            }
        }
        Ok(())
    }

    fn finish(mut self) -> anyhow::Result<SimulationSummary> {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.flush()?;
        }
        let summary = {
            let animator = self.character.animator();
            SimulationSummary {
                frames: animator.frames(),
                blinks: animator.blink().blinks_started(),
                peak_closure: self.peak_closure,
                final_gaze: animator.last_output().gaze,
                pointer_events: self.pointer_events,
            }
        };
        self.character.dispose(&mut self.frame_loop);
        tracing::info!(
            frames = summary.frames,
            blinks = summary.blinks,
            "Simulation finished"
        );
        Ok(summary)
    }
}

pub async fn run(config: &AppConfig, args: SimulateArgs) -> anyhow::Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid config: {e}"))?;

    let fps = args.fps.unwrap_or(config.simulation.fps);
    if fps == 0 {
        anyhow::bail!("--fps must be greater than 0");
    }
    let interval_ms = frame_interval_ms(fps);
    let frames = match (args.frames, args.duration) {
        (Some(frames), _) => frames,
        (None, Some(secs)) if secs.is_finite() && secs > 0.0 => (secs * fps as f64).ceil() as u64,
        (None, Some(secs)) => anyhow::bail!("--duration must be positive, got {secs}"),
        (None, None) => (config.simulation.duration_secs * fps as f64).ceil() as u64,
    };
    let duration_ms = frames as f64 * interval_ms;

    let mut session = Session::new(config, &args, duration_ms)?;
    println!(
        "Simulating {frames} frames at {fps}fps{}",
        if args.realtime { " (realtime)" } else { "" }
    );

    if args.realtime {
        session.run_realtime(frames, interval_ms).await?;
    } else {
        session.run_fixed(frames, interval_ms)?;
    }

    let summary = session.finish()?;
    println!("Frames rendered: {}", summary.frames);
    println!("Pointer events: {}", summary.pointer_events);
    println!("Blinks started: {}", summary.blinks);
    println!("Peak closure: {:.3}", summary.peak_closure);
    println!(
        "Final gaze: ({:.4}, {:.4})",
        summary.final_gaze.x, summary.final_gaze.y
    );
    if let Some(path) = &args.output {
        println!("Samples written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SimulateArgs {
        SimulateArgs {
            rig: None,
            pointer: None,
            frames: None,
            duration: None,
            fps: None,
            seed: Some(4),
            output: None,
            realtime: false,
        }
    }

    #[test]
    fn test_fixed_run_blinks_and_tracks_sweep() {
        let config = AppConfig::default();
        let interval = frame_interval_ms(60);
        let frames = 300;
        let mut session = Session::new(&config, &args(), frames as f64 * interval).unwrap();
        session.run_fixed(frames, interval).unwrap();
        let summary = session.finish().unwrap();

        assert_eq!(summary.frames, frames);
        // First blink at 2s, the second no earlier than 2s + 3.4s.
        assert_eq!(summary.blinks, 1);
        assert!(summary.peak_closure > 0.7 && summary.peak_closure <= 0.8);
        assert!(summary.pointer_events > 2);
        assert!(summary.final_gaze.x.abs() <= 0.3 && summary.final_gaze.y.abs() <= 0.3);
    }

    #[test]
    fn test_fixed_run_writes_samples() {
        let dir = std::env::temp_dir().join("gazerig_test_simulate");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("frames.jsonl");

        let config = AppConfig::default();
        let args = SimulateArgs {
            output: Some(path.clone()),
            ..args()
        };
        let interval = frame_interval_ms(30);
        let mut session = Session::new(&config, &args, 30.0 * interval).unwrap();
        session.run_fixed(30, interval).unwrap();
        session.finish().unwrap();

        let lines = std::fs::read_to_string(&path).unwrap().lines().count();
        assert_eq!(lines, 30);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_eye_node_fails_before_frames() {
        let mut config = AppConfig::default();
        config.rig.right_eye_node = "Eye_R".to_string();
        assert!(Session::new(&config, &args(), 1_000.0).is_err());
    }
}
