//! Viewport geometry and the events that change it

use vista_core::Rect;

/// The visible window onto the document
///
/// `scroll_y` is the document coordinate shown at the top edge of the
/// viewport. It is taken as reported by the host; overscroll (negative or
/// past the end) is allowed and simply clamps progress values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
    /// Total height of the scrollable document
    pub document_height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, document_height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
            document_height,
        }
    }

    pub fn with_scroll(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    /// The viewport's rectangle in document coordinates
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }

    /// The whole document's rectangle
    pub fn document_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.document_height)
    }

    /// Largest meaningful scroll offset
    pub fn max_scroll(&self) -> f32 {
        (self.document_height - self.height).max(0.0)
    }

    /// Apply an event to this viewport
    pub fn apply(&mut self, event: ScrollEvent) {
        match event {
            ScrollEvent::Scroll { y } => self.scroll_y = y,
            ScrollEvent::Resize { width, height } => {
                self.width = width;
                self.height = height;
            }
            ScrollEvent::DocumentResize { height } => self.document_height = height,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// Something that moved or resized the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollEvent {
    /// The document was scrolled to `y`
    Scroll { y: f32 },
    /// The viewport changed size
    Resize { width: f32, height: f32 },
    /// The document's content height changed (e.g. late layout)
    DocumentResize { height: f32 },
}
