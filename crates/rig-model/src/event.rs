//! Pointer event types for the Gazerig pointer stream.
//!
//! Scripts are stored as JSONL: an optional `# {header}` comment line
//! followed by one event per line. Move coordinates are surface pixels
//! with the origin at the top-left corner.

use serde::{Deserialize, Serialize};

pub use gazerig_common::clock::TimestampMs;

/// A single pointer event with timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Milliseconds since the stream epoch.
    pub t: TimestampMs,

    /// The event payload.
    #[serde(flatten)]
    pub kind: PointerEventKind,
}

/// Discriminated union of pointer event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEventKind {
    /// Pointer entered the render surface.
    Enter,

    /// Pointer left the render surface.
    Leave,

    /// Pointer moved over the surface.
    Move {
        /// Horizontal position in surface pixels.
        x: f64,
        /// Vertical position in surface pixels.
        y: f64,
    },
}

/// Metadata describing the surface a script was recorded against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerScriptHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Render surface size in pixels.
    pub surface_width: u32,
    pub surface_height: u32,

    /// Wall-clock time at stream start (RFC 3339).
    #[serde(default)]
    pub epoch_wall: String,
}

impl PointerScriptHeader {
    pub const SCHEMA_VERSION: &'static str = "1.0";

    pub fn new(surface_width: u32, surface_height: u32) -> Self {
        Self {
            schema_version: Self::SCHEMA_VERSION.to_string(),
            surface_width,
            surface_height,
            epoch_wall: String::new(),
        }
    }
}

impl PointerEvent {
    pub fn enter(t: TimestampMs) -> Self {
        Self {
            t,
            kind: PointerEventKind::Enter,
        }
    }

    pub fn leave(t: TimestampMs) -> Self {
        Self {
            t,
            kind: PointerEventKind::Leave,
        }
    }

    pub fn moved(t: TimestampMs, x: f64, y: f64) -> Self {
        Self {
            t,
            kind: PointerEventKind::Move { x, y },
        }
    }

    /// Extract the pixel position if this is a move event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self.kind {
            PointerEventKind::Move { x, y } => Some((x, y)),
            _ => None,
        }
    }
}

/// Parse events from JSONL content (one JSON object per line).
pub fn parse_events(jsonl: &str) -> Result<Vec<PointerEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Parse a full script: the header comment (if any) and all events.
pub fn parse_script(
    jsonl: &str,
) -> Result<(Option<PointerScriptHeader>, Vec<PointerEvent>), serde_json::Error> {
    let header = jsonl
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.strip_prefix('#'))
        .map(|rest| serde_json::from_str(rest.trim()))
        .transpose()?;
    Ok((header, parse_events(jsonl)?))
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[PointerEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format() {
        let event = PointerEvent::moved(16.5, 640.0, 360.0);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"t\":16.5"));
        assert!(json.contains("\"type\":\"move\""));
        assert!(json.contains("\"x\":640.0"));

        let json = serde_json::to_string(&PointerEvent::enter(0.0)).unwrap();
        assert_eq!(json, r#"{"t":0.0,"type":"enter"}"#);
    }

    #[test]
    fn test_parse_script_reads_header() {
        let jsonl = concat!(
            "# {\"schema_version\":\"1.0\",\"surface_width\":800,\"surface_height\":600}\n",
            "{\"t\":0,\"type\":\"enter\"}\n",
            "\n",
            "{\"t\":5,\"type\":\"move\",\"x\":400,\"y\":300}\n",
            "{\"t\":9,\"type\":\"leave\"}\n",
        );
        let (header, events) = parse_script(jsonl).unwrap();
        let header = header.unwrap();
        assert_eq!(header.surface_width, 800);
        assert_eq!(header.surface_height, 600);
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].position(), Some((400.0, 300.0)));
        assert_eq!(events[2].kind, PointerEventKind::Leave);
    }

    #[test]
    fn test_parse_script_without_header() {
        let (header, events) = parse_script("{\"t\":1,\"type\":\"enter\"}\n").unwrap();
        assert!(header.is_none());
        assert_eq!(events, vec![PointerEvent::enter(1.0)]);
    }

    #[test]
    fn test_serialize_then_parse_preserves_order() {
        let events = vec![
            PointerEvent::enter(0.0),
            PointerEvent::moved(10.0, 1.0, 2.0),
            PointerEvent::leave(20.0),
        ];
        let jsonl = serialize_events(&events).unwrap();
        assert_eq!(jsonl.lines().count(), 3);
        assert_eq!(parse_events(&jsonl).unwrap(), events);
    }

    #[test]
    fn test_unknown_event_type_is_an_error() {
        assert!(parse_events("{\"t\":0,\"type\":\"wheel\"}").is_err());
    }

    #[test]
    fn test_position_only_for_moves() {
        assert_eq!(PointerEvent::enter(0.0).position(), None);
        assert_eq!(PointerEvent::leave(0.0).position(), None);
    }
}
