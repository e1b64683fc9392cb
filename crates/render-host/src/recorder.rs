//! Per-frame JSONL trace of eye output.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gazerig_animation_core::animator::FrameOutput;
use gazerig_animation_core::blink::BlinkPhase;
use gazerig_common::clock::TimestampMs;
use gazerig_common::error::{GazerigError, GazerigResult};
use gazerig_rig_model::math::Vec2;
use gazerig_rig_model::transform::{NodeId, Transform, TransformHost};

use crate::frame_loop::FrameInfo;
use crate::scene::Scene;

/// One recorded frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    pub frame: u64,
    pub t: TimestampMs,
    pub gaze: Vec2,
    pub closure: f64,
    pub phase: BlinkPhase,
    /// Left eye local transform after the frame.
    pub left: Transform,
    pub right: Transform,
}

impl FrameSample {
    /// Capture a sample from the scene after `info` rendered.
    pub fn capture(
        info: &FrameInfo,
        output: &FrameOutput,
        scene: &Scene,
        left: NodeId,
        right: NodeId,
    ) -> GazerigResult<Self> {
        let node = |id: NodeId| {
            scene
                .transform(id)
                .copied()
                .ok_or_else(|| GazerigError::simulation(format!("node {} vanished", id.0)))
        };
        Ok(Self {
            frame: info.index,
            t: info.now_ms,
            gaze: output.gaze,
            closure: output.closure,
            phase: output.phase,
            left: node(left)?,
            right: node(right)?,
        })
    }
}

/// Append-only writer of [`FrameSample`] lines.
pub struct FrameRecorder {
    writer: BufWriter<File>,
    path: PathBuf,
    samples_written: u64,
}

impl FrameRecorder {
    pub fn create(path: impl Into<PathBuf>) -> GazerigResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
            samples_written: 0,
        })
    }

    pub fn record(&mut self, sample: &FrameSample) -> GazerigResult<()> {
        let json = serde_json::to_string(sample)?;
        writeln!(self.writer, "{json}")?;
        self.samples_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> GazerigResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FrameRecorder {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Read a recording back.
pub fn read_samples(path: &Path) -> GazerigResult<Vec<FrameSample>> {
    let content = std::fs::read_to_string(path)?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(GazerigError::from))
        .collect()
}
