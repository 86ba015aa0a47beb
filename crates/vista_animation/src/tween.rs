//! Timed transitions between two values

use crate::easing::Easing;
use crate::values::Interpolate;

/// A one-shot transition from `from` to `to`
///
/// Time only advances while playing. The delay is part of the tween's
/// timeline: during it the value stays at `from`.
#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    duration_ms: u32,
    delay_ms: u32,
    easing: Easing,
    /// Time since start, including the delay
    elapsed_ms: f32,
    playing: bool,
    finished: bool,
}

impl<T: Interpolate> Tween<T> {
    /// Create a linear tween
    pub fn new(from: T, to: T, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            delay_ms: 0,
            easing: Easing::Linear,
            elapsed_ms: 0.0,
            playing: false,
            finished: false,
        }
    }

    /// Set the easing curve (builder pattern)
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set a delay before the transition begins (builder pattern)
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Start (or restart) from the beginning
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.finished = self.total_ms() == 0;
        self.playing = !self.finished;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the tween has reached `to`
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Linear progress of the transition itself (0.0 to 1.0), excluding delay
    pub fn progress(&self) -> f32 {
        if self.finished {
            return 1.0;
        }
        let active = self.elapsed_ms - self.delay_ms as f32;
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        (active / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Current interpolated value
    pub fn value(&self) -> T {
        let eased = self.easing.apply(self.progress());
        self.from.lerp(&self.to, eased)
    }

    /// Advance by `dt_ms`. Returns whether the tween is still playing.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }

        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.total_ms() as f32 {
            self.elapsed_ms = self.total_ms() as f32;
            self.playing = false;
            self.finished = true;
        }
        self.playing
    }

    pub fn from_value(&self) -> &T {
        &self.from
    }

    pub fn to_value(&self) -> &T {
        &self.to
    }

    fn total_ms(&self) -> u32 {
        self.delay_ms.saturating_add(self.duration_ms)
    }
}
