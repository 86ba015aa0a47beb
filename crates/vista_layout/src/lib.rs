//! Vista Scroll Layer
//!
//! Headless scroll-reactive components for landing pages. The host owns a
//! [`ScrollContext`] and an [`AnimationScheduler`](vista_animation::AnimationScheduler),
//! feeds the context scroll/resize events and the scheduler frame time, and
//! reads plain values back out: progress, mapped style values, reveal flags,
//! counter text and carousel pages.
//!
//! # Example
//!
//! ```rust
//! use vista_layout::prelude::*;
//!
//! let context = ScrollContext::new(Viewport::new(1280.0, 800.0, 4000.0));
//! let scheduler = AnimationScheduler::new();
//!
//! // Reading progress bar
//! let page = context.observe_progress(ScrollTarget::Document, ScrollRange::DOCUMENT);
//! let bar_width = Mapper::linear([0.0, 1.0], [0.0, 100.0f32]).unwrap().bind(&page);
//!
//! // Stats row counting up once it is on screen
//! let users = CountUp::new(
//!     &context,
//!     scheduler.handle(),
//!     Rect::new(0.0, 1800.0, 1280.0, 300.0),
//!     RootMargin::px(-100.0),
//!     50_000.0,
//!     2000,
//! )
//! .with_suffix("+");
//!
//! context.dispatch(ScrollEvent::Scroll { y: 1600.0 });
//! assert_eq!(bar_width.get(), 50.0);
//! assert!(users.is_revealed());
//!
//! for _ in 0..125 {
//!     scheduler.advance(16.0);
//! }
//! assert_eq!(users.text(), "50,000+");
//! ```

pub mod carousel;
pub mod context;
pub mod count_up;
pub mod intersection;
pub mod motion;
pub mod reveal;
pub mod scroll;
pub mod viewport;

pub use carousel::Carousel;
pub use context::{ScrollContext, SourceId, WatchId};
pub use count_up::CountUp;
pub use intersection::{MarginValue, RootMargin};
pub use motion::{MotionOptions, RevealMotion};
pub use reveal::{RevealController, RevealState};
pub use scroll::{
    scroll_progress, Anchor, BindProgress, MappedValue, ProgressSource, ScrollOffset,
    ScrollRange, ScrollTarget,
};
pub use viewport::{ScrollEvent, Viewport};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::carousel::Carousel;
    pub use crate::context::ScrollContext;
    pub use crate::count_up::CountUp;
    pub use crate::intersection::RootMargin;
    pub use crate::motion::{MotionOptions, RevealMotion};
    pub use crate::reveal::{RevealController, RevealState};
    pub use crate::scroll::{
        Anchor, BindProgress, MappedValue, ProgressSource, ScrollOffset, ScrollRange, ScrollTarget,
    };
    pub use crate::viewport::{ScrollEvent, Viewport};

    pub use vista_animation::{
        format_count, AnimationScheduler, Easing, Mapper, SchedulerHandle, StyleFrame,
    };
    pub use vista_core::{Color, EngineConfig, Rect, Vec2, VistaError};
}
