//! Vista Animation System
//!
//! Scroll-driven value mapping and time-driven animations.
//!
//! # Features
//!
//! - **Mappers**: piecewise-linear maps from scroll progress to any
//!   interpolatable value (parallax offsets, fades, colors)
//! - **Style Frames**: opacity + offset + scale interpolated as one value
//! - **Easing**: standard CSS timing curves, including arbitrary cubic beziers
//! - **Counters**: fixed-tick count-up animations that land exactly on target
//! - **Tweens**: timed transitions between two values with delay and easing
//! - **Scheduler**: advances counters and tweens from the host's frame clock;
//!   wrapper types deregister themselves when dropped

pub mod counter;
pub mod easing;
pub mod mapper;
pub mod scheduler;
pub mod tween;
pub mod values;

pub use counter::{format_count, Counter, CounterState};
pub use easing::Easing;
pub use mapper::{map_range, Breakpoint, Mapper};
pub use scheduler::{
    AnimatedCounter, AnimatedTween, AnimationScheduler, CounterId, SchedulerHandle, TweenId,
};
pub use tween::Tween;
pub use values::{Interpolate, StyleFrame};
