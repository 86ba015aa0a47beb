//! Animation scheduler
//!
//! Owns every running counter and tween and advances them on a fixed tick.
//! The host calls [`AnimationScheduler::advance`] from its frame callback
//! with the elapsed wall time; the scheduler turns that into whole ticks of
//! `tick_interval_ms`, so animation speed is independent of the host's
//! refresh rate. Nothing blocks: each tick is a discrete step the host can
//! stop issuing at any time.
//!
//! Animations are registered implicitly through wrapper types:
//! - [`AnimatedCounter`] - count-up counters
//! - [`AnimatedTween`] - timed [`StyleFrame`] transitions
//!
//! Dropping a wrapper removes its entry, which cancels any ticks it still had
//! outstanding.

use crate::counter::{Counter, CounterState};
use crate::tween::Tween;
use crate::values::StyleFrame;
use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use vista_core::EngineConfig;

new_key_type! {
    /// Handle to a registered counter
    pub struct CounterId;
    /// Handle to a registered tween
    pub struct TweenId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    counters: SlotMap<CounterId, Counter>,
    tweens: SlotMap<TweenId, Tween<StyleFrame>>,
    tick_interval_ms: u32,
    /// Wall time received but not yet consumed by a whole tick
    pending_ms: f32,
    /// Total ticks run since creation
    tick_count: u64,
}

impl SchedulerInner {
    fn has_active(&self) -> bool {
        self.counters.values().any(|c| c.is_running())
            || self.tweens.values().any(|t| t.is_playing())
    }

    fn tick_once(&mut self) {
        let dt_ms = self.tick_interval_ms as f32;
        self.tick_count += 1;

        for (id, counter) in self.counters.iter_mut() {
            if counter.is_running() && !counter.tick() {
                tracing::debug!(?id, value = counter.value(), "counter finished");
            }
        }

        for (_, tween) in self.tweens.iter_mut() {
            tween.tick(dt_ms);
        }
    }
}

/// The animation scheduler that ticks all active animations
///
/// Typically owned by the page host and shared with components via
/// [`SchedulerHandle`].
///
/// ```rust
/// use vista_animation::{AnimatedCounter, AnimationScheduler};
///
/// let scheduler = AnimationScheduler::new();
/// let mut users = AnimatedCounter::new(scheduler.handle(), 50_000.0, 2000);
/// users.start();
///
/// // Host frame loop: 2 seconds of frames
/// for _ in 0..125 {
///     scheduler.advance(16.0);
/// }
/// assert_eq!(users.value(), 50_000.0);
/// ```
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
    /// Set when a tick changed something the host should render
    needs_redraw: Arc<AtomicBool>,
}

impl AnimationScheduler {
    /// Create a scheduler ticking every 16ms
    pub fn new() -> Self {
        Self::with_tick_interval(16)
    }

    /// Create a scheduler using the configured tick interval
    pub fn with_config(config: &EngineConfig) -> Self {
        Self::with_tick_interval(config.tick_interval_ms)
    }

    /// Create a scheduler ticking every `tick_interval_ms` (at least 1)
    pub fn with_tick_interval(tick_interval_ms: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                counters: SlotMap::with_key(),
                tweens: SlotMap::with_key(),
                tick_interval_ms: tick_interval_ms.max(1),
                pending_ms: 0.0,
                tick_count: 0,
            })),
            needs_redraw: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.inner.lock().tick_interval_ms
    }

    /// Feed `dt_ms` of elapsed wall time and run every whole tick it covers
    ///
    /// Leftover time carries over to the next call. While nothing is
    /// animating, time is discarded so a counter started later does not
    /// receive a burst of stale ticks.
    ///
    /// Returns true if any animations are still active.
    pub fn advance(&self, dt_ms: f32) -> bool {
        let mut inner = self.inner.lock();

        if !inner.has_active() {
            inner.pending_ms = 0.0;
            return false;
        }

        inner.pending_ms += dt_ms.max(0.0);
        let interval = inner.tick_interval_ms as f32;
        let mut ticked = false;

        while inner.pending_ms >= interval {
            inner.pending_ms -= interval;
            inner.tick_once();
            ticked = true;

            if !inner.has_active() {
                inner.pending_ms = 0.0;
                break;
            }
        }

        if ticked {
            self.needs_redraw.store(true, Ordering::Release);
        }

        let active = inner.has_active();
        tracing::trace!(
            tick_count = inner.tick_count,
            active,
            "AnimationScheduler: advanced {dt_ms}ms"
        );
        active
    }

    /// Run exactly one tick regardless of elapsed time
    ///
    /// Returns true if any animations are still active.
    pub fn tick(&self) -> bool {
        let mut inner = self.inner.lock();
        inner.tick_once();
        self.needs_redraw.store(true, Ordering::Release);
        inner.has_active()
    }

    /// Check and clear the needs_redraw flag
    pub fn take_needs_redraw(&self) -> bool {
        self.needs_redraw.swap(false, Ordering::Acquire)
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.inner.lock().has_active()
    }

    /// Number of registered counters (running or not)
    pub fn counter_count(&self) -> usize {
        self.inner.lock().counters.len()
    }

    /// Number of registered tweens (playing or not)
    pub fn tween_count(&self) -> usize {
        self.inner.lock().tweens.len()
    }

    /// Total ticks run since creation
    pub fn tick_count(&self) -> u64 {
        self.inner.lock().tick_count
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("AnimationScheduler")
            .field("tick_interval_ms", &inner.tick_interval_ms)
            .field("counters", &inner.counters.len())
            .field("tweens", &inner.tweens.len())
            .finish()
    }
}

/// A weak handle to the animation scheduler
///
/// This is passed to components that need to register animations.
/// It won't prevent the scheduler from being dropped; every operation on a
/// dropped scheduler is a no-op.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    // =========================================================================
    // Counter Operations
    // =========================================================================

    /// Register an idle counter and return its ID
    pub fn register_counter(&self) -> Option<CounterId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = inner.lock();
            let tick_ms = guard.tick_interval_ms;
            guard.counters.insert(Counter::new(tick_ms))
        })
    }

    /// Start a registered counter; see [`Counter::start`]
    pub fn start_counter(&self, id: CounterId, target: f64, duration_ms: u32) -> bool {
        let Some(inner) = self.inner.upgrade() else {
            tracing::warn!("start_counter on a dropped scheduler");
            return false;
        };
        let mut guard = inner.lock();
        let started = guard
            .counters
            .get_mut(id)
            .is_some_and(|counter| counter.start(target, duration_ms));
        if started {
            tracing::debug!(?id, target, duration_ms, "counter started");
        }
        started
    }

    /// Reset a registered counter to idle
    pub fn reset_counter(&self, id: CounterId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(counter) = inner.lock().counters.get_mut(id) {
                counter.reset();
            }
        }
    }

    /// Access a counter's state
    pub fn with_counter<F, R>(&self, id: CounterId, f: F) -> Option<R>
    where
        F: FnOnce(&Counter) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().counters.get(id).map(f))
    }

    /// Current exact counter value
    pub fn counter_value(&self, id: CounterId) -> Option<f64> {
        self.with_counter(id, Counter::value)
    }

    /// Current counter state
    pub fn counter_state(&self, id: CounterId) -> Option<CounterState> {
        self.with_counter(id, Counter::state)
    }

    /// Remove a counter, cancelling its remaining ticks
    pub fn remove_counter(&self, id: CounterId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().counters.remove(id);
        }
    }

    // =========================================================================
    // Tween Operations
    // =========================================================================

    /// Register a tween and return its ID
    pub fn register_tween(&self, tween: Tween<StyleFrame>) -> Option<TweenId> {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().tweens.insert(tween))
    }

    /// Start (or restart) a tween
    pub fn start_tween(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(tween) = inner.lock().tweens.get_mut(id) {
                tween.start();
            }
        }
    }

    /// Current tween value
    pub fn tween_value(&self, id: TweenId) -> Option<StyleFrame> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().tweens.get(id).map(|t| t.value()))
    }

    /// Check if a tween is playing
    pub fn is_tween_playing(&self, id: TweenId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().tweens.get(id).map(|t| t.is_playing()))
            .unwrap_or(false)
    }

    /// Remove a tween
    pub fn remove_tween(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().tweens.remove(id);
        }
    }

    /// Tick interval of the scheduler, if it is still alive
    pub fn tick_interval_ms(&self) -> Option<u32> {
        self.inner.upgrade().map(|inner| inner.lock().tick_interval_ms)
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

// ============================================================================
// Animated Counter
// ============================================================================

/// A count-up counter that registers itself with the scheduler
///
/// Owned by the element that displays it. Dropping it removes the counter
/// from the scheduler, cancelling any ticks still outstanding.
pub struct AnimatedCounter {
    handle: SchedulerHandle,
    counter_id: Option<CounterId>,
    target: f64,
    duration_ms: u32,
}

impl AnimatedCounter {
    /// Register an idle counter for `target` over `duration_ms`
    pub fn new(handle: SchedulerHandle, target: f64, duration_ms: u32) -> Self {
        let counter_id = handle.register_counter();
        if counter_id.is_none() {
            tracing::warn!("AnimatedCounter created without a live scheduler");
        }
        Self {
            handle,
            counter_id,
            target,
            duration_ms,
        }
    }

    /// Start counting; idempotent while running, one-shot until [`reset`](Self::reset)
    pub fn start(&mut self) -> bool {
        match self.counter_id {
            Some(id) => self.handle.start_counter(id, self.target, self.duration_ms),
            None => false,
        }
    }

    /// A callback that starts this counter, for wiring to events
    ///
    /// The callback holds only weak references; once the counter is dropped
    /// it does nothing.
    pub fn start_trigger(&self) -> impl Fn() + Send + Sync + 'static {
        let handle = self.handle.clone();
        let counter_id = self.counter_id;
        let target = self.target;
        let duration_ms = self.duration_ms;
        move || {
            if let Some(id) = counter_id {
                handle.start_counter(id, target, duration_ms);
            }
        }
    }

    /// Return to zero so the counter can run again
    pub fn reset(&mut self) {
        if let Some(id) = self.counter_id {
            self.handle.reset_counter(id);
        }
    }

    /// Exact accumulated value
    pub fn value(&self) -> f64 {
        self.counter_id
            .and_then(|id| self.handle.counter_value(id))
            .unwrap_or(0.0)
    }

    /// Value to render (whole numbers while counting, exact target at the end)
    pub fn display_value(&self) -> f64 {
        self.counter_id
            .and_then(|id| self.handle.with_counter(id, Counter::display_value))
            .unwrap_or(0.0)
    }

    pub fn state(&self) -> CounterState {
        self.counter_id
            .and_then(|id| self.handle.counter_state(id))
            .unwrap_or_default()
    }

    pub fn is_running(&self) -> bool {
        self.state() == CounterState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state() == CounterState::Finished
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
}

impl Drop for AnimatedCounter {
    fn drop(&mut self) {
        if let Some(id) = self.counter_id.take() {
            self.handle.remove_counter(id);
        }
    }
}

impl std::fmt::Debug for AnimatedCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedCounter")
            .field("target", &self.target)
            .field("duration_ms", &self.duration_ms)
            .field("state", &self.state())
            .finish()
    }
}

// ============================================================================
// Animated Tween
// ============================================================================

/// A [`StyleFrame`] tween that registers itself with the scheduler
pub struct AnimatedTween {
    handle: SchedulerHandle,
    tween_id: Option<TweenId>,
    /// Value reported when the scheduler is gone
    fallback: StyleFrame,
}

impl AnimatedTween {
    /// Register `tween` (not started)
    pub fn new(handle: SchedulerHandle, tween: Tween<StyleFrame>) -> Self {
        let fallback = *tween.to_value();
        let tween_id = handle.register_tween(tween);
        Self {
            handle,
            tween_id,
            fallback,
        }
    }

    /// Start (or restart) the tween
    pub fn start(&self) {
        if let Some(id) = self.tween_id {
            self.handle.start_tween(id);
        }
    }

    /// A callback that starts this tween, holding only weak references
    pub fn start_trigger(&self) -> impl Fn() + Send + Sync + 'static {
        let handle = self.handle.clone();
        let tween_id = self.tween_id;
        move || {
            if let Some(id) = tween_id {
                handle.start_tween(id);
            }
        }
    }

    /// Current frame
    pub fn get(&self) -> StyleFrame {
        self.tween_id
            .and_then(|id| self.handle.tween_value(id))
            .unwrap_or(self.fallback)
    }

    pub fn is_playing(&self) -> bool {
        self.tween_id
            .is_some_and(|id| self.handle.is_tween_playing(id))
    }
}

impl Drop for AnimatedTween {
    fn drop(&mut self) {
        if let Some(id) = self.tween_id.take() {
            self.handle.remove_tween(id);
        }
    }
}

impl std::fmt::Debug for AnimatedTween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedTween")
            .field("frame", &self.get())
            .field("playing", &self.is_playing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    #[test]
    fn test_advance_runs_whole_ticks() {
        let scheduler = AnimationScheduler::with_tick_interval(16);
        let mut counter = AnimatedCounter::new(scheduler.handle(), 160.0, 160);
        counter.start();

        // 10ms is less than a tick: nothing happens yet
        assert!(scheduler.advance(10.0));
        assert_eq!(counter.value(), 0.0);

        // 10 + 6 = one whole tick
        scheduler.advance(6.0);
        assert_eq!(counter.value(), 16.0);

        // A long frame catches up on several ticks at once
        scheduler.advance(48.0);
        assert_eq!(counter.value(), 64.0);
    }

    #[test]
    fn test_counter_reaches_target_within_duration() {
        let scheduler = AnimationScheduler::new();
        let mut counter = AnimatedCounter::new(scheduler.handle(), 50_000.0, 2000);
        counter.start();

        let mut elapsed = 0.0;
        let mut last = 0.0;
        while elapsed < 2000.0 {
            scheduler.advance(16.0);
            elapsed += 16.0;
            let value = counter.value();
            assert!(value >= last, "counter went backwards at {elapsed}ms");
            last = value;
        }

        assert_eq!(counter.value(), 50_000.0);
        assert!(counter.is_finished());
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_idle_time_is_discarded() {
        let scheduler = AnimationScheduler::new();
        let mut counter = AnimatedCounter::new(scheduler.handle(), 100.0, 1600);

        // Lots of frames before the counter starts
        assert!(!scheduler.advance(5000.0));

        counter.start();
        scheduler.advance(16.0);
        assert_eq!(counter.value(), 1.0);
    }

    #[test]
    fn test_drop_removes_counter() {
        let scheduler = AnimationScheduler::new();
        let mut counter = AnimatedCounter::new(scheduler.handle(), 10.0, 1000);
        counter.start();
        assert_eq!(scheduler.counter_count(), 1);
        assert!(scheduler.has_active_animations());

        drop(counter);
        assert_eq!(scheduler.counter_count(), 0);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_start_trigger() {
        let scheduler = AnimationScheduler::new();
        let counter = AnimatedCounter::new(scheduler.handle(), 10.0, 16);
        let trigger = counter.start_trigger();

        trigger();
        assert!(counter.is_running());
        scheduler.advance(16.0);
        assert_eq!(counter.value(), 10.0);

        // Triggering a finished counter does not restart it
        trigger();
        assert!(counter.is_finished());

        drop(counter);
        // Dangling trigger is harmless
        trigger();
        assert_eq!(scheduler.counter_count(), 0);
    }

    #[test]
    fn test_reset_allows_restart() {
        let scheduler = AnimationScheduler::new();
        let mut counter = AnimatedCounter::new(scheduler.handle(), 10.0, 16);
        counter.start();
        scheduler.advance(16.0);
        assert!(counter.is_finished());
        assert!(!counter.start());

        counter.reset();
        assert_eq!(counter.value(), 0.0);
        assert!(counter.start());
    }

    #[test]
    fn test_animated_tween() {
        let scheduler = AnimationScheduler::new();
        let tween = AnimatedTween::new(
            scheduler.handle(),
            Tween::new(StyleFrame::hidden(40.0), StyleFrame::IDENTITY, 160).easing(Easing::Linear),
        );

        assert_eq!(tween.get(), StyleFrame::hidden(40.0));
        tween.start();
        assert!(tween.is_playing());

        scheduler.advance(80.0);
        assert!((tween.get().opacity - 0.5).abs() < 1e-4);

        scheduler.advance(80.0);
        assert_eq!(tween.get(), StyleFrame::IDENTITY);
        assert!(!tween.is_playing());

        drop(tween);
        assert_eq!(scheduler.tween_count(), 0);
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        // Scheduler is dropped, handle should not be alive
        assert!(!handle.is_alive());

        // Operations should safely no-op
        assert!(handle.register_counter().is_none());
        let mut counter = AnimatedCounter::new(handle, 5.0, 100);
        assert!(!counter.start());
        assert_eq!(counter.value(), 0.0);
    }

    #[test]
    fn test_needs_redraw_flag() {
        let scheduler = AnimationScheduler::new();
        let mut counter = AnimatedCounter::new(scheduler.handle(), 10.0, 1000);
        assert!(!scheduler.take_needs_redraw());

        counter.start();
        scheduler.advance(16.0);
        assert!(scheduler.take_needs_redraw());
        assert!(!scheduler.take_needs_redraw());
    }
}
