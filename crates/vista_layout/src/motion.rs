//! Entrance transitions
//!
//! [`RevealMotion`] plays a [`StyleFrame`] tween the first time its element
//! is revealed. The usual entrance fades the element in while it rises 40px
//! into place; lists stagger their items by a fixed step.

use vista_animation::{AnimatedTween, Easing, SchedulerHandle, StyleFrame, Tween};
use vista_core::{EngineConfig, Rect, Result};

use crate::context::ScrollContext;
use crate::intersection::RootMargin;
use crate::reveal::RevealController;

/// How an element enters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionOptions {
    pub margin: RootMargin,
    /// Frame before the reveal
    pub hidden: StyleFrame,
    /// Frame once the transition completes
    pub shown: StyleFrame,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
}

impl MotionOptions {
    /// Fade in while rising 40px over 600ms
    pub fn fade_up() -> Self {
        Self {
            margin: RootMargin::ZERO,
            hidden: StyleFrame::hidden(40.0),
            shown: StyleFrame::IDENTITY,
            duration_ms: 600,
            delay_ms: 0,
            easing: Easing::EaseOut,
        }
    }

    /// Fade in without moving
    pub fn fade_in() -> Self {
        Self {
            hidden: StyleFrame::IDENTITY.with_opacity(0.0),
            ..Self::fade_up()
        }
    }

    /// Fade in while sliding horizontally from `offset_x`
    pub fn slide_in(offset_x: f32) -> Self {
        Self {
            hidden: StyleFrame::IDENTITY
                .with_opacity(0.0)
                .with_offset(offset_x, 0.0),
            ..Self::fade_up()
        }
    }

    /// Fade-up entrance with durations and margin taken from `config`
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            margin: RootMargin::parse(&config.reveal_margin)?,
            hidden: StyleFrame::hidden(config.reveal_offset_y),
            duration_ms: config.reveal_duration_ms,
            ..Self::fade_up()
        })
    }

    pub fn with_margin(mut self, margin: RootMargin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Delay the `index`th item of a list by `index * step_ms`
    pub fn stagger(mut self, index: usize, step_ms: u32) -> Self {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.delay_ms = self
            .delay_ms
            .saturating_add(index.saturating_mul(step_ms));
        self
    }

    fn tween(&self) -> Tween<StyleFrame> {
        Tween::new(self.hidden, self.shown, self.duration_ms)
            .easing(self.easing)
            .delay(self.delay_ms)
    }
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self::fade_up()
    }
}

/// A reveal that plays an entrance transition
pub struct RevealMotion {
    reveal: RevealController,
    tween: AnimatedTween,
}

impl RevealMotion {
    pub fn new(
        context: &ScrollContext,
        scheduler: SchedulerHandle,
        bounds: Rect,
        options: MotionOptions,
    ) -> Self {
        let tween = AnimatedTween::new(scheduler, options.tween());
        let mut reveal = context.observe_reveal(bounds, options.margin);
        reveal.on_reveal(tween.start_trigger());
        Self { reveal, tween }
    }

    /// Frame to render now
    pub fn frame(&self) -> StyleFrame {
        self.tween.get()
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal.observe()
    }

    /// Whether the entrance transition is still running
    pub fn is_animating(&self) -> bool {
        self.tween.is_playing()
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.reveal.set_bounds(bounds);
    }
}

impl std::fmt::Debug for RevealMotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealMotion")
            .field("revealed", &self.is_revealed())
            .field("frame", &self.frame())
            .finish()
    }
}
