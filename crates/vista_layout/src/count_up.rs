//! Count-up statistics
//!
//! A [`CountUp`] is a counter that starts the first time its element is
//! revealed. It never starts before that and runs at most once.

use vista_animation::{format_count, AnimatedCounter, CounterState, SchedulerHandle};
use vista_core::{EngineConfig, Rect, Result};

use crate::context::ScrollContext;
use crate::intersection::RootMargin;
use crate::reveal::RevealController;

pub struct CountUp {
    reveal: RevealController,
    counter: AnimatedCounter,
    suffix: String,
}

impl CountUp {
    /// Count from zero to `target` over `duration_ms` once `bounds` is revealed
    pub fn new(
        context: &ScrollContext,
        scheduler: SchedulerHandle,
        bounds: Rect,
        margin: RootMargin,
        target: f64,
        duration_ms: u32,
    ) -> Self {
        let counter = AnimatedCounter::new(scheduler, target, duration_ms);
        let mut reveal = context.observe_reveal(bounds, margin);
        reveal.on_reveal(counter.start_trigger());

        Self {
            reveal,
            counter,
            suffix: String::new(),
        }
    }

    /// Counter with the configured duration and reveal margin
    pub fn from_config(
        context: &ScrollContext,
        scheduler: SchedulerHandle,
        bounds: Rect,
        target: f64,
        config: &EngineConfig,
    ) -> Result<Self> {
        let margin = RootMargin::parse(&config.reveal_margin)?;
        Ok(Self::new(
            context,
            scheduler,
            bounds,
            margin,
            target,
            config.counter_duration_ms,
        ))
    }

    /// Text appended to the formatted value, e.g. `"+"` or `"%"`
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn value(&self) -> f64 {
        self.counter.value()
    }

    pub fn display_value(&self) -> f64 {
        self.counter.display_value()
    }

    /// Formatted display value, e.g. `"50,000+"`
    pub fn text(&self) -> String {
        format_count(self.display_value(), &self.suffix)
    }

    pub fn target(&self) -> f64 {
        self.counter.target()
    }

    pub fn state(&self) -> CounterState {
        self.counter.state()
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal.observe()
    }

    pub fn is_running(&self) -> bool {
        self.counter.is_running()
    }

    pub fn is_finished(&self) -> bool {
        self.counter.is_finished()
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.reveal.set_bounds(bounds);
    }
}

impl std::fmt::Debug for CountUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountUp")
            .field("text", &self.text())
            .field("revealed", &self.is_revealed())
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{ScrollEvent, Viewport};
    use vista_animation::AnimationScheduler;

    fn setup() -> (ScrollContext, AnimationScheduler) {
        (
            ScrollContext::new(Viewport::new(1280.0, 800.0, 4000.0)),
            AnimationScheduler::new(),
        )
    }

    fn stats_bounds() -> Rect {
        Rect::new(0.0, 2400.0, 1280.0, 300.0)
    }

    #[test]
    fn test_does_not_start_before_reveal() {
        let (context, scheduler) = setup();
        let users = CountUp::new(
            &context,
            scheduler.handle(),
            stats_bounds(),
            RootMargin::px(-100.0),
            50_000.0,
            2000,
        )
        .with_suffix("+");

        for _ in 0..200 {
            scheduler.advance(16.0);
        }
        assert_eq!(users.value(), 0.0);
        assert_eq!(users.text(), "0+");
        assert_eq!(users.state(), CounterState::Idle);
    }

    #[test]
    fn test_counts_to_target_after_reveal() {
        let (context, scheduler) = setup();
        let users = CountUp::new(
            &context,
            scheduler.handle(),
            stats_bounds(),
            RootMargin::px(-100.0),
            50_000.0,
            2000,
        )
        .with_suffix("+");

        context.dispatch(ScrollEvent::Scroll { y: 2000.0 });
        assert!(users.is_revealed());
        assert!(users.is_running());

        scheduler.advance(1000.0);
        let halfway = users.display_value();
        assert!(halfway > 0.0 && halfway < 50_000.0);
        assert_eq!(halfway, halfway.floor());

        scheduler.advance(1000.0);
        assert!(users.is_finished());
        assert_eq!(users.text(), "50,000+");
    }

    #[test]
    fn test_runs_once_per_lifetime() {
        let (context, scheduler) = setup();
        let uptime = CountUp::new(
            &context,
            scheduler.handle(),
            stats_bounds(),
            RootMargin::ZERO,
            99.99,
            160,
        )
        .with_suffix("%");

        context.dispatch(ScrollEvent::Scroll { y: 2000.0 });
        scheduler.advance(160.0);
        assert_eq!(uptime.text(), "99.99%");

        // Scrolling away and back does not restart it
        context.dispatch(ScrollEvent::Scroll { y: 0.0 });
        context.dispatch(ScrollEvent::Scroll { y: 2000.0 });
        assert!(uptime.is_finished());
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_unmount_cancels_counter() {
        let (context, scheduler) = setup();
        let users = CountUp::new(
            &context,
            scheduler.handle(),
            stats_bounds(),
            RootMargin::ZERO,
            1000.0,
            2000,
        );
        context.dispatch(ScrollEvent::Scroll { y: 2000.0 });
        scheduler.advance(160.0);
        assert!(users.is_running());

        drop(users);
        assert_eq!(scheduler.counter_count(), 0);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_from_config() {
        let (context, scheduler) = setup();
        let config = EngineConfig::reduced_motion();
        let stat = CountUp::from_config(
            &context,
            scheduler.handle(),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            12.0,
            &config,
        )
        .unwrap();

        // Visible at mount and zero duration: lands immediately
        assert!(stat.is_finished());
        assert_eq!(stat.text(), "12");
    }
}
