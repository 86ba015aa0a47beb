//! One-shot reveal on first view
//!
//! A [`RevealController`] moves from [`RevealState::Pending`] to
//! [`RevealState::Triggered`] the first time its element intersects the
//! margin-adjusted viewport, and never goes back. Scrolling the element out
//! of view again has no effect.
//!
//! ```rust
//! use vista_layout::prelude::*;
//!
//! let context = ScrollContext::new(Viewport::new(1280.0, 800.0, 4000.0));
//! let features = context.observe_reveal(
//!     Rect::new(0.0, 1200.0, 1280.0, 600.0),
//!     RootMargin::px(-100.0),
//! );
//! assert!(!features.observe());
//!
//! context.dispatch(ScrollEvent::Scroll { y: 600.0 });
//! assert!(features.observe());
//!
//! context.dispatch(ScrollEvent::Scroll { y: 0.0 });
//! assert!(features.observe());
//! assert_eq!(context.watch_count(), 0);
//! ```

use std::sync::Weak;

use parking_lot::Mutex;
use vista_core::{Broadcast, Rect, Subscription};

use crate::context::{ContextInner, WatchId};

/// Reveal lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevealState {
    /// Not yet seen
    #[default]
    Pending,
    /// Seen at least once (terminal)
    Triggered,
}

/// Handle to a reveal watch registered with a
/// [`ScrollContext`](crate::ScrollContext)
///
/// Dropping the controller removes its watch if it has not triggered yet,
/// along with every callback registered through [`on_reveal`](Self::on_reveal).
pub struct RevealController {
    state: Broadcast<RevealState>,
    context: Weak<Mutex<ContextInner>>,
    watch_id: Option<WatchId>,
    subscriptions: Vec<Subscription>,
}

impl RevealController {
    pub(crate) fn new(
        context: Weak<Mutex<ContextInner>>,
        watch_id: Option<WatchId>,
        state: Broadcast<RevealState>,
    ) -> Self {
        Self {
            state,
            context,
            watch_id,
            subscriptions: Vec::new(),
        }
    }

    /// Whether the element has been revealed
    pub fn observe(&self) -> bool {
        self.state() == RevealState::Triggered
    }

    pub fn state(&self) -> RevealState {
        self.state.get()
    }

    /// Run `callback` once when the element is revealed
    ///
    /// Runs immediately if the element has already been revealed.
    pub fn on_reveal<F>(&mut self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        if self.observe() {
            callback();
            return;
        }

        let subscription = self.state.subscribe(move |state| {
            if *state == RevealState::Triggered {
                callback();
            }
        });
        self.subscriptions.push(subscription);
    }

    /// Update the element's bounds after a layout change
    ///
    /// The new bounds are tested on the next dispatched event. No-op once
    /// revealed.
    pub fn set_bounds(&self, bounds: Rect) {
        let (Some(inner), Some(id)) = (self.context.upgrade(), self.watch_id) else {
            return;
        };
        let mut guard = inner.lock();
        if let Some(watch) = guard.watches.get_mut(id) {
            watch.bounds = bounds;
        }
    }
}

impl Drop for RevealController {
    fn drop(&mut self) {
        if let (Some(inner), Some(id)) = (self.context.upgrade(), self.watch_id.take()) {
            // Already gone if it triggered
            if inner.lock().watches.remove(id).is_some() {
                tracing::debug!(?id, "reveal watch detached before triggering");
            }
        }
    }
}

impl std::fmt::Debug for RevealController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealController")
            .field("state", &self.state())
            .field("callbacks", &self.subscriptions.len())
            .finish()
    }
}
