//! Append-only pointer script writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gazerig_common::error::{GazerigError, GazerigResult};
use gazerig_rig_model::event::{PointerEvent, PointerScriptHeader};

use crate::PointerBackend;

/// Events between forced flushes.
const FLUSH_EVERY: u64 = 1000;

/// Writes pointer events to a JSONL script.
pub struct PointerScriptWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    events_written: u64,
}

impl PointerScriptWriter {
    /// Create the file (truncating any existing one) and write the header line.
    pub fn create(path: impl Into<PathBuf>, header: &PointerScriptHeader) -> GazerigResult<Self> {
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
        let mut writer = BufWriter::new(file);

        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| GazerigError::invalid_input(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            path,
            events_written: 0,
        })
    }

    pub fn write_event(&mut self, event: &PointerEvent) -> GazerigResult<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.writer, "{json}")?;
        self.events_written += 1;

        if self.events_written % FLUSH_EVERY == 0 {
            self.flush()?;
        }
        Ok(())
    }

    /// Drain `backend` completely into the script.
    pub fn write_all_from(&mut self, backend: &mut dyn PointerBackend) -> GazerigResult<u64> {
        let before = self.events_written;
        for event in backend.poll(f64::INFINITY)? {
            self.write_event(&event)?;
        }
        self.flush()?;
        Ok(self.events_written - before)
    }

    pub fn flush(&mut self) -> GazerigResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn events_written(&self) -> u64 {
        self.events_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PointerScriptWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
