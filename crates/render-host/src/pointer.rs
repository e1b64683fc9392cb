//! Pixel-to-NDC mapping for the render surface.

use gazerig_common::error::{GazerigError, GazerigResult};
use gazerig_rig_model::event::{PointerEvent, PointerEventKind, PointerScriptHeader};
use gazerig_rig_model::math::Vec2;

/// Pointer input after surface mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Enter,
    Leave,
    /// Normalized device coordinates: `[-1, 1]` on each axis, +Y up.
    Move(Vec2),
}

/// The pixel area pointer coordinates are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerSurface {
    width: u32,
    height: u32,
}

impl PointerSurface {
    pub fn new(width: u32, height: u32) -> GazerigResult<Self> {
        if width == 0 || height == 0 {
            return Err(GazerigError::invalid_input(format!(
                "pointer surface must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn from_header(header: &PointerScriptHeader) -> GazerigResult<Self> {
        Self::new(header.surface_width, header.surface_height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Map a pixel position (top-left origin, +Y down) to NDC.
    pub fn to_ndc(&self, px: f64, py: f64) -> Vec2 {
        let w = self.width as f64;
        let h = self.height as f64;
        Vec2::new(2.0 * px / w - 1.0, -(2.0 * py / h - 1.0))
    }

    pub fn to_input(&self, event: &PointerEvent) -> PointerInput {
        match event.kind {
            PointerEventKind::Enter => PointerInput::Enter,
            PointerEventKind::Leave => PointerInput::Leave,
            PointerEventKind::Move { x, y } => PointerInput::Move(self.to_ndc(x, y)),
        }
    }
}
