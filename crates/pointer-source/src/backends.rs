//! Pointer backend implementations.

use std::f64::consts::TAU;
use std::path::Path;

use gazerig_common::clock::TimestampMs;
use gazerig_common::error::{GazerigError, GazerigResult};
use gazerig_rig_model::event::{parse_script, PointerEvent, PointerScriptHeader};

use crate::PointerBackend;

/// Replays a fixed list of events.
#[derive(Debug)]
pub struct ScriptedBackend {
    events: Vec<PointerEvent>,
    index: usize,
    header: Option<PointerScriptHeader>,
}

impl ScriptedBackend {
    /// Events are stably sorted by timestamp, so same-time events keep
    /// their script order.
    pub fn new(mut events: Vec<PointerEvent>) -> Self {
        events.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self {
            events,
            index: 0,
            header: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Load a JSONL script from disk.
    pub fn from_file(path: &Path) -> GazerigResult<Self> {
        if !path.exists() {
            return Err(GazerigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let (header, events) = parse_script(&content)?;
        if let Some(bad) = events.iter().find(|e| !e.t.is_finite()) {
            return Err(GazerigError::invalid_input(format!(
                "non-finite event timestamp in {}: {:?}",
                path.display(),
                bad
            )));
        }
        tracing::info!(path = %path.display(), events = events.len(), "Pointer script loaded");
        let mut backend = Self::new(events);
        backend.header = header;
        Ok(backend)
    }

    /// Surface metadata from the script header, if it had one.
    pub fn header(&self) -> Option<&PointerScriptHeader> {
        self.header.as_ref()
    }

    /// Total number of events in the script.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Timestamp of the last event.
    pub fn end_time(&self) -> Option<TimestampMs> {
        self.events.last().map(|e| e.t)
    }
}

impl PointerBackend for ScriptedBackend {
    fn poll(&mut self, until: TimestampMs) -> GazerigResult<Vec<PointerEvent>> {
        let start = self.index;
        while self.index < self.events.len() && self.events[self.index].t <= until {
            self.index += 1;
        }
        Ok(self.events[start..self.index].to_vec())
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn is_exhausted(&self) -> bool {
        self.index >= self.events.len()
    }
}

/// Parameters of the synthetic sweep path.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    /// Total length; the pointer leaves at this time.
    pub duration_ms: f64,
    /// Spacing of move events during a burst.
    pub move_interval_ms: f64,
    /// Length of each movement burst.
    pub burst_ms: f64,
    /// Stationary gap after each burst.
    pub dwell_ms: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            surface_width: 1280,
            surface_height: 720,
            duration_ms: 10_000.0,
            move_interval_ms: 16.0,
            burst_ms: 600.0,
            dwell_ms: 400.0,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> GazerigResult<()> {
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(GazerigError::invalid_input("sweep surface must be non-empty"));
        }
        for (field, value) in [
            ("duration_ms", self.duration_ms),
            ("move_interval_ms", self.move_interval_ms),
            ("burst_ms", self.burst_ms),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GazerigError::invalid_input(format!(
                    "sweep {field} must be > 0, got {value}"
                )));
            }
        }
        if !(self.dwell_ms.is_finite() && self.dwell_ms >= 0.0) {
            return Err(GazerigError::invalid_input(format!(
                "sweep dwell_ms must be >= 0, got {}",
                self.dwell_ms
            )));
        }
        Ok(())
    }

    /// Pixel position along the path at `t` milliseconds.
    fn point_at(&self, t: f64) -> (f64, f64) {
        let w = self.surface_width as f64;
        let h = self.surface_height as f64;
        let s = t / 1_000.0;
        let x = w * 0.5 + w * 0.45 * (TAU * 0.23 * s).sin();
        let y = h * 0.5 + h * 0.40 * (TAU * 0.31 * s + 0.7).sin();
        (x, y)
    }

    /// Every event the sweep produces, in order.
    pub fn events(&self) -> GazerigResult<Vec<PointerEvent>> {
        SweepBackend::new(self.clone())?.poll(f64::INFINITY)
    }
}

/// Deterministic synthetic pointer path.
///
/// Enter at 0, alternate move bursts and dwells, leave at `duration_ms`.
/// Events are generated on demand as `poll` advances.
#[derive(Debug)]
pub struct SweepBackend {
    config: SweepConfig,
    next_move_at: TimestampMs,
    entered: bool,
    left: bool,
}

impl SweepBackend {
    pub fn new(config: SweepConfig) -> GazerigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            next_move_at: 0.0,
            entered: false,
            left: false,
        })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }
}

impl PointerBackend for SweepBackend {
    fn poll(&mut self, until: TimestampMs) -> GazerigResult<Vec<PointerEvent>> {
        let mut events = Vec::new();
        if until < 0.0 || self.left {
            return Ok(events);
        }
        if !self.entered {
            events.push(PointerEvent::enter(0.0));
            self.entered = true;
        }

        let config = &self.config;
        let cycle = config.burst_ms + config.dwell_ms;
        while self.next_move_at < config.duration_ms && self.next_move_at <= until {
            let t = self.next_move_at;
            if t % cycle < config.burst_ms {
                let (x, y) = config.point_at(t);
                events.push(PointerEvent::moved(t, x, y));
            }
            self.next_move_at += config.move_interval_ms;
        }

        if config.duration_ms <= until {
            events.push(PointerEvent::leave(config.duration_ms));
            self.left = true;
        }
        Ok(events)
    }

    fn name(&self) -> &str {
        "sweep"
    }

    fn is_exhausted(&self) -> bool {
        self.left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazerig_rig_model::event::PointerEventKind;

    #[test]
    fn test_scripted_poll_delivers_in_order_once() {
        let mut backend = ScriptedBackend::new(vec![
            PointerEvent::moved(20.0, 1.0, 1.0),
            PointerEvent::enter(0.0),
            PointerEvent::leave(40.0),
        ]);

        let first = backend.poll(10.0).unwrap();
        assert_eq!(first, vec![PointerEvent::enter(0.0)]);
        assert!(backend.poll(10.0).unwrap().is_empty());

        let rest = backend.poll(100.0).unwrap();
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[1].kind, PointerEventKind::Leave);
        assert!(backend.is_exhausted());
    }

    #[test]
    fn test_scripted_sort_is_stable() {
        let mut backend = ScriptedBackend::new(vec![
            PointerEvent::moved(5.0, 1.0, 1.0),
            PointerEvent::leave(5.0),
        ]);
        let events = backend.poll(5.0).unwrap();
        assert_eq!(events[0].position(), Some((1.0, 1.0)));
        assert_eq!(events[1].kind, PointerEventKind::Leave);
    }

    #[test]
    fn test_empty_backend_is_exhausted() {
        let mut backend = ScriptedBackend::empty();
        assert!(backend.is_exhausted());
        assert!(backend.poll(1e9).unwrap().is_empty());
        assert_eq!(backend.end_time(), None);
    }

    #[test]
    fn test_sweep_starts_with_enter_and_ends_with_leave() {
        let events = SweepConfig::default().events().unwrap();
        assert_eq!(events.first().unwrap().kind, PointerEventKind::Enter);
        assert_eq!(events.last().unwrap().kind, PointerEventKind::Leave);
        assert_eq!(events.last().unwrap().t, 10_000.0);
    }

    #[test]
    fn test_sweep_stays_on_surface() {
        let config = SweepConfig::default();
        for event in config.events().unwrap() {
            if let Some((x, y)) = event.position() {
                assert!((0.0..=1280.0).contains(&x), "x={x}");
                assert!((0.0..=720.0).contains(&y), "y={y}");
            }
        }
    }

    #[test]
    fn test_sweep_has_dwell_gaps() {
        let config = SweepConfig::default();
        let moves: Vec<f64> = config
            .events()
            .unwrap()
            .iter()
            .filter(|e| e.position().is_some())
            .map(|e| e.t)
            .collect();
        let longest_gap = moves
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(0.0, f64::max);
        // Gaps must outlast the default 100ms response delay.
        assert!(longest_gap > 300.0, "longest gap {longest_gap}");
    }

    #[test]
    fn test_sweep_generates_incrementally() {
        let config = SweepConfig {
            duration_ms: 1_000.0,
            ..Default::default()
        };
        let all = config.events().unwrap();

        let mut backend = SweepBackend::new(config).unwrap();
        assert!(backend.poll(-1.0).unwrap().is_empty());
        let mut polled = Vec::new();
        for frame in 0..60 {
            let batch = backend.poll(frame as f64 * 16.0).unwrap();
            assert!(batch.iter().all(|e| e.t <= frame as f64 * 16.0));
            polled.extend(batch);
        }
        assert!(!backend.is_exhausted());
        polled.extend(backend.poll(1_000.0).unwrap());

        assert!(backend.is_exhausted());
        assert!(backend.poll(f64::INFINITY).unwrap().is_empty());
        assert_eq!(polled, all);
    }

    #[test]
    fn test_long_sweep_holds_no_event_buffer() {
        let day = SweepConfig {
            duration_ms: 86_400_000.0,
            ..Default::default()
        };
        let mut backend = SweepBackend::new(day).unwrap();
        let first = backend.poll(16.0).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].kind, PointerEventKind::Enter);
        assert!(!backend.is_exhausted());
    }

    #[test]
    fn test_sweep_rejects_zero_interval() {
        let config = SweepConfig {
            move_interval_ms: 0.0,
            ..Default::default()
        };
        assert!(SweepBackend::new(config).is_err());
    }
}
