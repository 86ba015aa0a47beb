//! Vista Core
//!
//! Foundational primitives shared by the Vista scroll-reactive presentation
//! engine:
//!
//! - **Geometry**: points, sizes and rectangles in document coordinates
//! - **Color**: linear RGBA colors that can be interpolated
//! - **Broadcast**: a single-value fan-out channel with RAII subscriptions
//! - **Errors**: the [`VistaError`] type shared by every crate
//! - **Configuration**: [`EngineConfig`], loadable from TOML
//!
//! # Example
//!
//! ```rust
//! use vista_core::Broadcast;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//!
//! let progress = Broadcast::new(0.0f32);
//! let seen = Arc::new(AtomicU32::new(0));
//!
//! let seen_in_callback = Arc::clone(&seen);
//! let subscription = progress.subscribe(move |p| {
//!     seen_in_callback.store(p.to_bits(), Ordering::SeqCst);
//! });
//!
//! progress.set(0.5);
//! assert_eq!(f32::from_bits(seen.load(Ordering::SeqCst)), 0.5);
//!
//! // Dropping the subscription detaches the callback
//! drop(subscription);
//! assert_eq!(progress.subscriber_count(), 0);
//! ```

pub mod broadcast;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;

pub use broadcast::{Broadcast, Subscription};
pub use color::Color;
pub use config::EngineConfig;
pub use error::{Result, VistaError};
pub use geometry::{Point, Rect, Size, Vec2};
