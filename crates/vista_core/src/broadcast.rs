//! Single-value fan-out channel
//!
//! A [`Broadcast`] holds the latest value of something many readers care
//! about (typically a scroll progress) and pushes every change to its
//! subscribers. Unlike a keyed store, there is exactly one value and one
//! writer; readers only observe.
//!
//! Subscriptions are RAII: the callback stays registered for as long as the
//! returned [`Subscription`] is alive and is removed when it drops.
//!
//! Callbacks are invoked after the internal lock is released, so a callback
//! may read the broadcast (or subscribe to it) without deadlocking. Every
//! subscriber of one `set` call sees the same value.

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::sync::{Arc, Weak};

new_key_type! {
    /// Key of a registered subscriber
    pub struct SubscriberId;
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct BroadcastInner<T> {
    value: T,
    /// Incremented on every change
    version: u64,
    subscribers: SlotMap<SubscriberId, Callback<T>>,
}

/// A shared value that notifies subscribers when it changes
///
/// Cloning a `Broadcast` produces another handle to the same value.
pub struct Broadcast<T> {
    inner: Arc<Mutex<BroadcastInner<T>>>,
}

impl<T> Clone for Broadcast<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + Send + 'static> Broadcast<T> {
    /// Create a broadcast holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BroadcastInner {
                value: initial,
                version: 0,
                subscribers: SlotMap::with_key(),
            })),
        }
    }

    /// Get the current value
    pub fn get(&self) -> T {
        self.inner.lock().value.clone()
    }

    /// Number of changes published so far
    pub fn version(&self) -> u64 {
        self.inner.lock().version
    }

    /// Publish a new value
    ///
    /// Subscribers are only notified when the value actually changed.
    /// Returns whether it changed.
    pub fn set(&self, value: T) -> bool {
        let callbacks: SmallVec<[Callback<T>; 4]> = {
            let mut inner = self.inner.lock();
            if inner.value == value {
                return false;
            }
            inner.value = value.clone();
            inner.version += 1;
            inner.subscribers.values().cloned().collect()
        };

        for callback in &callbacks {
            callback(&value);
        }
        true
    }

    /// Register a callback invoked on every change
    ///
    /// The callback is not invoked for the current value; read it with
    /// [`Broadcast::get`] if needed.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.lock().subscribers.insert(Arc::new(callback));
        let weak: Weak<Mutex<BroadcastInner<T>>> = Arc::downgrade(&self.inner);

        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.lock().subscribers.remove(id);
                }
            })),
        }
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Broadcast<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Broadcast")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Handle keeping a subscription alive
///
/// Dropping the handle removes the callback. Outliving the broadcast is fine:
/// the handle then does nothing on drop.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Unsubscribe now (same as dropping the handle)
    pub fn cancel(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
