//! Geometry primitives
//!
//! All coordinates are in document space: `y` grows downwards from the top of
//! the scrollable document, independent of the current scroll offset.

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero (or negative)
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Grow (positive) or shrink (negative) each edge independently
    ///
    /// Sizes never go below zero. An axis shrunk past zero collapses to the
    /// midpoint of its crossed edges.
    pub fn expand(&self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        let (x, width) = collapse_span(self.left() - left, self.right() + right);
        let (y, height) = collapse_span(self.top() - top, self.bottom() + bottom);
        Rect::new(x, y, width, height)
    }

    /// Strict overlap test: rectangles that only touch at an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// `(start, length)` of the span `start..end`, or a zero-length span at the
/// midpoint when the edges have crossed
fn collapse_span(start: f32, end: f32) -> (f32, f32) {
    if end < start {
        ((start + end) / 2.0, 0.0)
    } else {
        (start, end - start)
    }
}

/// 2D vector, used for translate offsets
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 110.0);
    }

    #[test]
    fn test_rect_expand_negative_shrinks() {
        let rect = Rect::new(0.0, 0.0, 400.0, 800.0).expand(-50.0, -50.0, -50.0, -50.0);
        assert_eq!(rect, Rect::new(50.0, 50.0, 300.0, 700.0));

        // Shrinking past zero clamps the size
        let collapsed = Rect::new(0.0, 0.0, 10.0, 10.0).expand(-20.0, -20.0, -20.0, -20.0);
        assert_eq!(collapsed.size, Size::ZERO);
    }

    #[test]
    fn test_rect_expand_collapses_to_center() {
        let collapsed = Rect::new(0.0, 0.0, 1000.0, 800.0).expand(-600.0, -600.0, -600.0, -600.0);
        assert_eq!(collapsed, Rect::new(500.0, 400.0, 0.0, 0.0));

        // Uneven margins collapse to the midpoint of the crossed edges
        let uneven = Rect::new(0.0, 0.0, 100.0, 100.0).expand(0.0, -150.0, 0.0, -10.0);
        assert_eq!(uneven, Rect::new(-20.0, 0.0, 0.0, 100.0));
    }

    #[test]
    fn test_rect_intersects_is_strict() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let touching = Rect::new(0.0, 100.0, 100.0, 100.0);
        let overlapping = Rect::new(0.0, 99.0, 100.0, 100.0);

        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
    }
}
