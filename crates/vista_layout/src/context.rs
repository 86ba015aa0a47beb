//! Scroll context
//!
//! The [`ScrollContext`] is the single host for everything that reacts to
//! the viewport: progress sources and reveal watches register with it, and
//! the page feeds it [`ScrollEvent`]s from its event loop.
//!
//! Every dispatch recomputes all sources and watches against the same
//! viewport snapshot. Results are collected under the lock and published
//! after it is released, so subscribers may call back into the context.

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use vista_core::{Broadcast, EngineConfig, Rect, Result, Subscription};

use crate::intersection::RootMargin;
use crate::reveal::{RevealController, RevealState};
use crate::scroll::{scroll_progress, ProgressSource, ScrollRange, ScrollTarget};
use crate::viewport::{ScrollEvent, Viewport};

new_key_type! {
    /// Key of a registered progress source
    pub struct SourceId;
    /// Key of a pending reveal watch
    pub struct WatchId;
}

pub(crate) struct SourceEntry {
    pub(crate) target: ScrollTarget,
    pub(crate) range: ScrollRange,
    pub(crate) output: Broadcast<f32>,
}

pub(crate) struct WatchEntry {
    pub(crate) bounds: Rect,
    pub(crate) margin: RootMargin,
    pub(crate) state: Broadcast<RevealState>,
}

pub(crate) struct ContextInner {
    pub(crate) viewport: Viewport,
    pub(crate) sources: SlotMap<SourceId, SourceEntry>,
    pub(crate) watches: SlotMap<WatchId, WatchEntry>,
    config: EngineConfig,
    default_margin: RootMargin,
    scrolled: Broadcast<bool>,
}

impl ContextInner {
    fn is_scrolled(&self) -> bool {
        self.viewport.scroll_y > self.config.scrolled_threshold_px
    }
}

/// Recompute every source and watch, then publish the results
pub(crate) fn recompute(inner: &Mutex<ContextInner>) {
    let (progress, revealed, scrolled) = {
        let mut guard = inner.lock();
        let viewport = guard.viewport;

        let progress: SmallVec<[(Broadcast<f32>, f32); 8]> = guard
            .sources
            .values()
            .map(|source| {
                let rect = source.target.rect(&viewport);
                let p = scroll_progress(&rect, &source.range, &viewport);
                (source.output.clone(), p)
            })
            .collect();

        let hits: SmallVec<[WatchId; 4]> = guard
            .watches
            .iter()
            .filter(|(_, watch)| watch.margin.intersects(&watch.bounds, &viewport))
            .map(|(id, _)| id)
            .collect();

        // Reveals are one-shot: a triggered watch is torn down immediately
        let revealed: SmallVec<[Broadcast<RevealState>; 4]> = hits
            .into_iter()
            .filter_map(|id| {
                let watch = guard.watches.remove(id)?;
                tracing::debug!(?id, bounds = ?watch.bounds, "reveal triggered");
                Some(watch.state)
            })
            .collect();

        tracing::trace!(
            scroll_y = viewport.scroll_y,
            sources = progress.len(),
            revealed = revealed.len(),
            "ScrollContext: recomputed"
        );

        let scrolled = (guard.scrolled.clone(), guard.is_scrolled());
        (progress, revealed, scrolled)
    };

    for (output, p) in progress {
        output.set(p);
    }
    for state in revealed {
        state.set(RevealState::Triggered);
    }
    let (flag, value) = scrolled;
    flag.set(value);
}

/// Host for scroll progress sources and reveal watches
///
/// Cloning a `ScrollContext` produces another handle to the same host.
/// Registrations hold only weak references back to it.
#[derive(Clone)]
pub struct ScrollContext {
    inner: Arc<Mutex<ContextInner>>,
}

impl ScrollContext {
    /// Create a context with the standard configuration
    pub fn new(viewport: Viewport) -> Self {
        Self::build(viewport, EngineConfig::standard(), RootMargin::ZERO)
    }

    /// Create a context from configuration
    ///
    /// Fails if the configured reveal margin does not parse.
    pub fn with_config(viewport: Viewport, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let margin = RootMargin::parse(&config.reveal_margin)?;
        Ok(Self::build(viewport, config.clone(), margin))
    }

    fn build(viewport: Viewport, config: EngineConfig, default_margin: RootMargin) -> Self {
        let scrolled = Broadcast::new(viewport.scroll_y > config.scrolled_threshold_px);
        Self {
            inner: Arc::new(Mutex::new(ContextInner {
                viewport,
                sources: SlotMap::with_key(),
                watches: SlotMap::with_key(),
                config,
                default_margin,
                scrolled,
            })),
        }
    }

    /// Apply a scroll or resize event and recompute everything registered
    ///
    /// All subscribers have been notified when this returns.
    pub fn dispatch(&self, event: ScrollEvent) {
        tracing::trace!(?event, "ScrollContext: dispatch");
        self.inner.lock().viewport.apply(event);
        recompute(&self.inner);
    }

    /// Current viewport snapshot
    pub fn viewport(&self) -> Viewport {
        self.inner.lock().viewport
    }

    pub fn config(&self) -> EngineConfig {
        self.inner.lock().config.clone()
    }

    /// Reveal margin from configuration
    pub fn default_margin(&self) -> RootMargin {
        self.inner.lock().default_margin
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Track the progress of `target` through `range`
    ///
    /// The returned source already holds the progress for the current
    /// viewport.
    pub fn observe_progress(&self, target: ScrollTarget, range: ScrollRange) -> ProgressSource {
        let mut inner = self.inner.lock();
        let viewport = inner.viewport;
        let initial = scroll_progress(&target.rect(&viewport), &range, &viewport);
        let output = Broadcast::new(initial);

        let id = inner.sources.insert(SourceEntry {
            target,
            range,
            output: output.clone(),
        });
        tracing::debug!(?id, ?target, initial, "progress source attached");

        ProgressSource::new(Arc::downgrade(&self.inner), id, target, range, output)
    }

    /// Watch `bounds` for its first intersection with the viewport
    ///
    /// An element already intersecting at mount is revealed immediately and
    /// no watch is kept for it.
    pub fn observe_reveal(&self, bounds: Rect, margin: RootMargin) -> RevealController {
        let mut inner = self.inner.lock();
        let viewport = inner.viewport;

        if margin.intersects(&bounds, &viewport) {
            tracing::debug!(?bounds, "reveal triggered at mount");
            return RevealController::new(
                Arc::downgrade(&self.inner),
                None,
                Broadcast::new(RevealState::Triggered),
            );
        }

        let state = Broadcast::new(RevealState::Pending);
        let id = inner.watches.insert(WatchEntry {
            bounds,
            margin,
            state: state.clone(),
        });
        tracing::debug!(?id, ?bounds, "reveal watch attached");

        RevealController::new(Arc::downgrade(&self.inner), Some(id), state)
    }

    /// [`observe_reveal`](Self::observe_reveal) with the configured margin
    pub fn observe_reveal_default(&self, bounds: Rect) -> RevealController {
        let margin = self.default_margin();
        self.observe_reveal(bounds, margin)
    }

    // =========================================================================
    // Page Scroll State
    // =========================================================================

    /// Whether the page has scrolled more than `px`
    pub fn is_scrolled_past(&self, px: f32) -> bool {
        self.inner.lock().viewport.scroll_y > px
    }

    /// Whether the page has scrolled past the configured threshold
    pub fn is_scrolled(&self) -> bool {
        self.inner.lock().is_scrolled()
    }

    /// Be notified when [`is_scrolled`](Self::is_scrolled) flips
    pub fn on_scrolled_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let scrolled = self.inner.lock().scrolled.clone();
        scrolled.subscribe(move |value| callback(*value))
    }

    /// Number of attached progress sources
    pub fn source_count(&self) -> usize {
        self.inner.lock().sources.len()
    }

    /// Number of reveal watches still waiting to trigger
    pub fn watch_count(&self) -> usize {
        self.inner.lock().watches.len()
    }
}

impl std::fmt::Debug for ScrollContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ScrollContext")
            .field("viewport", &inner.viewport)
            .field("sources", &inner.sources.len())
            .field("watches", &inner.watches.len())
            .finish()
    }
}
