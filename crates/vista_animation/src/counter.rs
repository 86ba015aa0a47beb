//! Count-up counters
//!
//! A [`Counter`] climbs from zero to a target in fixed ticks. Each tick adds
//! `target / (duration / tick)`; the tick that would reach the target (or
//! exhaust the tick budget) lands exactly on it, so the final value never
//! drifts from floating point accumulation.
//!
//! The tick budget is the number of whole ticks that fit in the duration
//! (at least one), so the counter finishes no later than `duration` after
//! it starts.
//!
//! The counter itself is passive: something has to call [`Counter::tick`]
//! once per tick interval. Usually that is the
//! [`AnimationScheduler`](crate::scheduler::AnimationScheduler).

/// Lifecycle of a counter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CounterState {
    /// Not started yet
    #[default]
    Idle,
    /// Ticking towards the target
    Running,
    /// Landed on the target; only [`Counter::reset`] leaves this state
    Finished,
}

/// Fixed-tick interpolation from 0 to a target
#[derive(Clone, Debug)]
pub struct Counter {
    target: f64,
    current: f64,
    duration_ms: u32,
    tick_ms: u32,
    increment: f64,
    ticks: u32,
    tick_budget: u32,
    state: CounterState,
}

impl Counter {
    /// Create an idle counter ticking every `tick_ms` (at least 1)
    pub fn new(tick_ms: u32) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            duration_ms: 0,
            tick_ms: tick_ms.max(1),
            increment: 0.0,
            ticks: 0,
            tick_budget: 0,
            state: CounterState::Idle,
        }
    }

    /// Start counting towards `target` over `duration_ms`
    ///
    /// Only an idle counter starts. Calling this while running or after
    /// finishing does nothing; use [`Counter::reset`] to count again.
    /// Negative or non-finite targets count to zero. Returns whether the
    /// counter started.
    pub fn start(&mut self, target: f64, duration_ms: u32) -> bool {
        match self.state {
            CounterState::Running => {
                if target != self.target {
                    tracing::debug!(
                        "Counter already running towards {}, ignoring start({})",
                        self.target,
                        target
                    );
                }
                return false;
            }
            CounterState::Finished => return false,
            CounterState::Idle => {}
        }

        let target = if target.is_finite() { target.max(0.0) } else { 0.0 };
        self.target = target;
        self.current = 0.0;
        self.duration_ms = duration_ms;
        self.ticks = 0;

        if duration_ms == 0 {
            self.current = target;
            self.state = CounterState::Finished;
            return true;
        }

        let steps = duration_ms as f64 / self.tick_ms as f64;
        self.increment = target / steps;
        self.tick_budget = steps.floor().max(1.0) as u32;
        self.state = CounterState::Running;
        true
    }

    /// Advance one tick. Returns whether the counter is still running.
    pub fn tick(&mut self) -> bool {
        if self.state != CounterState::Running {
            return false;
        }

        self.ticks += 1;
        let next = self.current + self.increment;
        if next >= self.target || self.ticks >= self.tick_budget {
            self.current = self.target;
            self.state = CounterState::Finished;
            return false;
        }

        self.current = next;
        true
    }

    /// Return to idle at zero so the counter can be started again
    pub fn reset(&mut self) {
        self.current = 0.0;
        self.ticks = 0;
        self.state = CounterState::Idle;
    }

    /// The exact accumulated value
    pub fn value(&self) -> f64 {
        self.current
    }

    /// The value to render: whole numbers while counting, the exact target
    /// once finished
    pub fn display_value(&self) -> f64 {
        match self.state {
            CounterState::Finished => self.target,
            _ => self.current.floor(),
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    /// Ticks taken since the last start
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CounterState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == CounterState::Finished
    }
}

/// Format a counter value the way the stats row shows it
///
/// Thousands are grouped with commas and at most three fraction digits are
/// kept, with trailing zeros dropped: `50000` → `"50,000"`, `99.99` with
/// suffix `"%"` → `"99.99%"`.
pub fn format_count(value: f64, suffix: &str) -> String {
    if !value.is_finite() {
        return format!("{value}{suffix}");
    }

    let negative = value < 0.0;
    let milli = (value.abs() * 1000.0).round() as u64;
    let whole = milli / 1000;
    let frac = milli % 1000;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 8);
    if negative && milli != 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac != 0 {
        let frac = format!("{frac:03}");
        grouped.push('.');
        grouped.push_str(frac.trim_end_matches('0'));
    }

    grouped.push_str(suffix);
    grouped
}
