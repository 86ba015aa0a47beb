//! Scroll progress
//!
//! A [`ProgressSource`] turns the scroll position into a normalized progress
//! value in `[0, 1]` for either the whole document or one region of it.
//! Where progress starts and ends is described by a [`ScrollRange`]: two
//! [`ScrollOffset`]s, each pairing a point on the target with a point on the
//! viewport.
//!
//! # Example
//!
//! ```rust
//! use vista_layout::prelude::*;
//!
//! let context = ScrollContext::new(Viewport::new(1280.0, 800.0, 4000.0));
//!
//! // Hero section: progress runs while it scrolls out through the top
//! let hero = context.observe_progress(
//!     ScrollTarget::Region(Rect::new(0.0, 0.0, 1280.0, 800.0)),
//!     ScrollRange::PINNED,
//! );
//! let opacity = Mapper::new([(0.0, 1.0f32), (0.5, 0.0)]).unwrap().bind(&hero);
//!
//! context.dispatch(ScrollEvent::Scroll { y: 200.0 });
//! assert_eq!(hero.progress(), 0.25);
//! assert_eq!(opacity.get(), 0.5);
//! ```

use std::sync::Weak;

use parking_lot::Mutex;
use vista_animation::{Interpolate, Mapper};
use vista_core::{Broadcast, Rect, Subscription};

use crate::context::{self, ContextInner, SourceId};
use crate::viewport::Viewport;

// ============================================================================
// Targets and Offsets
// ============================================================================

/// What a progress source measures
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollTarget {
    /// The whole scrollable document
    Document,
    /// A region of the document, in document coordinates
    Region(Rect),
}

impl ScrollTarget {
    /// The measured rectangle for the given viewport
    pub fn rect(&self, viewport: &Viewport) -> Rect {
        match self {
            ScrollTarget::Document => viewport.document_rect(),
            ScrollTarget::Region(rect) => *rect,
        }
    }
}

/// A point along the vertical extent of a target or of the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    Start,
    Center,
    End,
    /// Fraction of the extent, 0.0 = start, 1.0 = end
    Fraction(f32),
}

impl Anchor {
    pub fn fraction(&self) -> f32 {
        match *self {
            Anchor::Start => 0.0,
            Anchor::Center => 0.5,
            Anchor::End => 1.0,
            Anchor::Fraction(f) => f,
        }
    }
}

/// "Target anchor meets viewport anchor", e.g. `start end`: the target's top
/// reaches the viewport's bottom
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollOffset {
    pub target: Anchor,
    pub viewport: Anchor,
}

impl ScrollOffset {
    pub const fn new(target: Anchor, viewport: Anchor) -> Self {
        Self { target, viewport }
    }

    /// Scroll position at which this offset is reached
    pub fn scroll_position(&self, target: &Rect, viewport_height: f32) -> f32 {
        target.top() + self.target.fraction() * target.height()
            - self.viewport.fraction() * viewport_height
    }
}

/// The two offsets mapped to progress 0 and 1
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    pub start: ScrollOffset,
    pub end: ScrollOffset,
}

impl ScrollRange {
    /// `start start` → `end end`: the target scrolls from its top to its bottom
    pub const DOCUMENT: ScrollRange = ScrollRange::new(
        ScrollOffset::new(Anchor::Start, Anchor::Start),
        ScrollOffset::new(Anchor::End, Anchor::End),
    );

    /// `start end` → `end start`: from entering at the bottom to leaving at the top
    pub const ENTER_EXIT: ScrollRange = ScrollRange::new(
        ScrollOffset::new(Anchor::Start, Anchor::End),
        ScrollOffset::new(Anchor::End, Anchor::Start),
    );

    /// `start start` → `end start`: from pinned at the top to fully scrolled out
    pub const PINNED: ScrollRange = ScrollRange::new(
        ScrollOffset::new(Anchor::Start, Anchor::Start),
        ScrollOffset::new(Anchor::End, Anchor::Start),
    );

    pub const fn new(start: ScrollOffset, end: ScrollOffset) -> Self {
        Self { start, end }
    }
}

impl Default for ScrollRange {
    fn default() -> Self {
        Self::DOCUMENT
    }
}

/// Progress of `target` through `range` for the given viewport
///
/// Zero-extent targets, and ranges whose end is not after their start, have
/// constant progress 0.
pub fn scroll_progress(target: &Rect, range: &ScrollRange, viewport: &Viewport) -> f32 {
    if target.height() <= 0.0 {
        return 0.0;
    }

    let start = range.start.scroll_position(target, viewport.height);
    let end = range.end.scroll_position(target, viewport.height);
    let span = end - start;
    if !(span > 0.0) {
        return 0.0;
    }

    let p = (viewport.scroll_y - start) / span;
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 1.0)
}

// ============================================================================
// Progress Source
// ============================================================================

/// A live progress value registered with a [`ScrollContext`](crate::ScrollContext)
///
/// Recomputed on every scroll and resize event dispatched to the context.
/// Dropping the source detaches it; outstanding subscriptions stop receiving
/// updates.
pub struct ProgressSource {
    context: Weak<Mutex<ContextInner>>,
    id: Option<SourceId>,
    target: ScrollTarget,
    range: ScrollRange,
    output: Broadcast<f32>,
}

impl ProgressSource {
    pub(crate) fn new(
        context: Weak<Mutex<ContextInner>>,
        id: SourceId,
        target: ScrollTarget,
        range: ScrollRange,
        output: Broadcast<f32>,
    ) -> Self {
        Self {
            context,
            id: Some(id),
            target,
            range,
            output,
        }
    }

    /// Current progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.output.get()
    }

    /// Be notified of every progress change
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.output.subscribe(move |p| callback(*p))
    }

    /// Derive a value from this source's progress
    pub fn map<T: Interpolate>(&self, mapper: Mapper<T>) -> MappedValue<T> {
        MappedValue {
            progress: self.output.clone(),
            mapper,
        }
    }

    /// Move the measured region after a layout change
    ///
    /// Progress is recomputed immediately. Has no effect on a
    /// [`ScrollTarget::Document`] source.
    pub fn set_region(&mut self, rect: Rect) {
        if matches!(self.target, ScrollTarget::Document) {
            return;
        }
        self.target = ScrollTarget::Region(rect);

        let (Some(inner), Some(id)) = (self.context.upgrade(), self.id) else {
            return;
        };
        if let Some(entry) = inner.lock().sources.get_mut(id) {
            entry.target = self.target;
        }
        context::recompute(&inner);
    }

    pub fn target(&self) -> ScrollTarget {
        self.target
    }

    pub fn range(&self) -> ScrollRange {
        self.range
    }
}

impl Drop for ProgressSource {
    fn drop(&mut self) {
        if let (Some(inner), Some(id)) = (self.context.upgrade(), self.id.take()) {
            inner.lock().sources.remove(id);
            tracing::debug!(?id, "progress source detached");
        }
    }
}

impl std::fmt::Debug for ProgressSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSource")
            .field("target", &self.target)
            .field("range", &self.range)
            .field("progress", &self.progress())
            .finish()
    }
}

/// Bind a [`Mapper`] to a [`ProgressSource`]
pub trait BindProgress<T: Interpolate> {
    fn bind(self, source: &ProgressSource) -> MappedValue<T>;
}

impl<T: Interpolate> BindProgress<T> for Mapper<T> {
    fn bind(self, source: &ProgressSource) -> MappedValue<T> {
        source.map(self)
    }
}

/// A mapper bound to a progress source
///
/// Reading it maps the source's latest progress, so every `MappedValue` of
/// one source agrees on `p` after an event.
#[derive(Clone)]
pub struct MappedValue<T: Interpolate> {
    progress: Broadcast<f32>,
    mapper: Mapper<T>,
}

impl<T: Interpolate> MappedValue<T> {
    /// Mapped value for the current progress
    pub fn get(&self) -> T {
        self.mapper.map(self.progress.get())
    }

    /// Be notified with the mapped value on every progress change
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        T: Send + Sync + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let mapper = self.mapper.clone();
        self.progress.subscribe(move |p| callback(mapper.map(*p)))
    }

    pub fn mapper(&self) -> &Mapper<T> {
        &self.mapper
    }
}

impl<T: Interpolate + std::fmt::Debug> std::fmt::Debug for MappedValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedValue")
            .field("value", &self.get())
            .finish()
    }
}
