//! Last-known input state: scroll offset, pointer position and viewport metrics.
//!
//! Event callbacks write this record as events arrive; the update loop reads
//! one snapshot per frame. Both run on the winit event loop thread, so there
//! is a single writer per field and no locking.

use winit::dpi::PhysicalPosition;

/// Normalised pointer position, each axis in `[-0.5, 0.5]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

/// Process-wide input record read once per frame by the update loop.
#[derive(Clone, Copy, Debug)]
pub struct InputState {
    scroll_y: f32,
    pointer: Pointer,
    viewport_width: f32,
    viewport_height: f32,
    document_height: f32,
}

impl InputState {
    /// `page_length` is the virtual page length in viewport heights; it fixes
    /// the document height the scroll offset is clamped against.
    pub fn new(viewport_width: f32, viewport_height: f32, page_length: f32) -> Self {
        Self {
            scroll_y: 0.0,
            pointer: Pointer::default(),
            viewport_width,
            viewport_height,
            document_height: viewport_height * page_length,
        }
    }

    /// Accumulate a wheel delta (positive scrolls down the page). The offset
    /// is clamped to `[0, document_height - viewport_height]`.
    pub fn scroll_by(&mut self, delta: f32) {
        let max_scroll = (self.document_height - self.viewport_height).max(0.0);
        self.scroll_y = (self.scroll_y + delta).clamp(0.0, max_scroll);
    }

    /// Normalise a cursor position against the viewport into `[-0.5, 0.5]^2`.
    pub fn set_pointer(&mut self, position: PhysicalPosition<f64>) {
        self.pointer = Pointer {
            x: (position.x as f32 / self.viewport_width - 0.5).clamp(-0.5, 0.5),
            y: (position.y as f32 / self.viewport_height - 0.5).clamp(-0.5, 0.5),
        };
    }

    /// Track a viewport resize. The document height follows the viewport and
    /// the scroll offset is re-clamped against the new range.
    pub fn resize(&mut self, width: f32, height: f32, page_length: f32) {
        self.viewport_width = width.max(1.0);
        self.viewport_height = height.max(1.0);
        self.document_height = self.viewport_height * page_length;
        self.scroll_by(0.0);
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn document_height(&self) -> f32 {
        self.document_height
    }
}
