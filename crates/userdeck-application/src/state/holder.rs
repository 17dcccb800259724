//! State Holder
//!
//! Holds one immutable snapshot and publishes replacements to subscribers.
//!
//! ## Features
//!
//! - Lock-free reads of the current snapshot
//! - Callback subscribers notified in publication order
//! - Async stream of snapshots for task-based consumers
//! - One notification per `update`, however many fields the transform changed
//!
//! ## Example
//!
//! ```ignore
//! use userdeck_application::StateHolder;
//!
//! let holder = StateHolder::new(0_u32);
//! let _sub = holder.subscribe(|value| println!("now {value}"));
//! holder.update(|n| n + 1);
//! ```

use crate::state::derived::DerivedState;
use arc_swap::ArcSwap;
use futures::stream::{self, Stream};
use parking_lot::Mutex;
use std::fmt;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

/// Default capacity of the snapshot stream channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Boxed async stream of published snapshots
pub type StateStream<S> = Pin<Box<dyn Stream<Item = Arc<S>> + Send + 'static>>;

/// Subscriber callback
pub(crate) type Callback<S> = Arc<dyn Fn(&Arc<S>) + Send + Sync>;

struct Shared<S> {
    current: ArcSwap<S>,
    /// Serializes updates so that publication order matches update order
    write: Mutex<()>,
    subscribers: Mutex<Vec<(u64, Callback<S>)>>,
    next_subscriber: AtomicU64,
    version: AtomicU64,
    closed: AtomicBool,
    sender: broadcast::Sender<Arc<S>>,
}

/// Container for the current state snapshot
///
/// Cloning a `StateHolder` yields another handle to the same state.
///
/// Callbacks run on the thread performing the update, with the holder's
/// write lock held. That lock is not reentrant, so a callback must not call
/// any of these on the same holder (or on a [`ReadOnlyState`] of it):
///
/// - [`update`](Self::update)
/// - [`set`](Self::set)
/// - [`close`](Self::close)
/// - [`derive`](Self::derive)
///
/// Reads, [`subscribe`](Self::subscribe), [`changes`](Self::changes) and
/// dropping a [`Subscription`] are safe from a callback.
pub struct StateHolder<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for StateHolder<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S> StateHolder<S>
where
    S: Send + Sync + 'static,
{
    /// Create a holder with the default stream capacity
    pub fn new(initial: S) -> Self {
        Self::with_capacity(initial, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a holder with a custom stream capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Snapshots buffered per stream reader before it lags
    pub fn with_capacity(initial: S, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            shared: Arc::new(Shared {
                current: ArcSwap::from_pointee(initial),
                write: Mutex::new(()),
                subscribers: Mutex::new(Vec::new()),
                next_subscriber: AtomicU64::new(0),
                version: AtomicU64::new(0),
                closed: AtomicBool::new(false),
                sender,
            }),
        }
    }

    /// Current snapshot
    pub fn current(&self) -> Arc<S> {
        self.shared.current.load_full()
    }

    /// Number of snapshots published since creation
    pub fn version(&self) -> u64 {
        self.shared.version.load(Ordering::SeqCst)
    }

    /// Whether the holder stopped accepting updates
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Number of registered callbacks
    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.lock().len()
    }

    /// Register a callback invoked with every published snapshot
    ///
    /// The callback is not invoked with the current value; read
    /// [`current`](Self::current) for that. Dropping the returned
    /// [`Subscription`] detaches the callback.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Arc<S>) + Send + Sync + 'static,
    {
        self.register(Arc::new(callback))
    }

    pub(crate) fn register(&self, callback: Callback<S>) -> Subscription {
        let id = self.shared.next_subscriber.fetch_add(1, Ordering::Relaxed);
        self.shared.subscribers.lock().push((id, callback));
        trace!(subscriber = id, "state subscriber registered");

        let shared: Weak<Shared<S>> = Arc::downgrade(&self.shared);
        Subscription::new(id, move || {
            if let Some(shared) = shared.upgrade() {
                shared.subscribers.lock().retain(|(sid, _)| *sid != id);
                trace!(subscriber = id, "state subscriber removed");
            }
        })
    }

    /// Run `f` against the current snapshot while no update can interleave
    pub(crate) fn with_current_locked<R>(&self, f: impl FnOnce(&Arc<S>) -> R) -> R {
        let _guard = self.shared.write.lock();
        f(&self.current())
    }

    /// Stream of snapshots published after this call
    ///
    /// A reader that falls more than the channel capacity behind skips ahead
    /// to the oldest retained snapshot.
    pub fn changes(&self) -> StateStream<S> {
        let receiver = self.shared.sender.subscribe();

        let stream = stream::unfold(receiver, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(snapshot) => return Some((snapshot, rx)),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("State stream lagged by {} snapshots", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });

        Box::pin(stream)
    }

    /// Stop accepting updates and drop every callback
    ///
    /// Takes the write lock. Later calls to `update` or `set` are ignored.
    /// Existing streams end once the last holder handle is dropped.
    pub fn close(&self) {
        let _guard = self.shared.write.lock();
        if !self.shared.closed.swap(true, Ordering::SeqCst) {
            self.shared.subscribers.lock().clear();
            debug!(version = self.version(), "state holder closed");
        }
    }

    /// Read-only handle to this state
    pub fn read_only(&self) -> ReadOnlyState<S> {
        ReadOnlyState {
            holder: self.clone(),
        }
    }

    /// Build a derived view recomputed when `select` yields a new value
    ///
    /// `compute` runs once immediately and again each time the selected
    /// sub-value differs from the previous one. Takes the write lock while
    /// seeding.
    pub fn derive<K, T, Sel, Comp>(&self, select: Sel, compute: Comp) -> DerivedState<T>
    where
        K: PartialEq + Send + 'static,
        T: PartialEq + Send + Sync + 'static,
        Sel: Fn(&S) -> K + Send + Sync + 'static,
        Comp: Fn(&K) -> T + Send + Sync + 'static,
    {
        DerivedState::from_source(self, select, compute)
    }

    fn publish_locked(&self, next: Arc<S>) {
        self.shared.current.store(Arc::clone(&next));
        let version = self.shared.version.fetch_add(1, Ordering::SeqCst) + 1;

        // Snapshot the list so callbacks may unsubscribe themselves
        let callbacks: Vec<Callback<S>> = self
            .shared
            .subscribers
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in &callbacks {
            callback(&next);
        }

        match self.shared.sender.send(next) {
            Ok(receivers) => trace!(version, receivers, "state published to streams"),
            Err(_) => trace!(version, "state published without stream receivers"),
        }
    }
}

impl<S> StateHolder<S>
where
    S: PartialEq + Send + Sync + 'static,
{
    /// Replace the snapshot with `transform(&current)`
    ///
    /// Publishes exactly one notification when the result differs from the
    /// current snapshot. Returns whether anything was published. Takes the
    /// write lock for the whole call, callbacks included.
    pub fn update<F>(&self, transform: F) -> bool
    where
        F: FnOnce(&S) -> S,
    {
        let _guard = self.shared.write.lock();
        if self.is_closed() {
            debug!("update ignored: state holder closed");
            return false;
        }

        let current = self.current();
        let next = transform(&current);
        if next == *current {
            trace!("state unchanged; nothing published");
            return false;
        }

        self.publish_locked(Arc::new(next));
        true
    }

    /// Replace the snapshot with `value`
    pub fn set(&self, value: S) -> bool {
        self.update(move |_| value)
    }
}

impl<S> fmt::Debug for StateHolder<S>
where
    S: fmt::Debug + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHolder")
            .field("current", &self.current())
            .field("version", &self.version())
            .field("subscribers", &self.subscriber_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Read-only view of a [`StateHolder`]
///
/// Handed to consumers that may observe but not mutate the state.
pub struct ReadOnlyState<S> {
    holder: StateHolder<S>,
}

impl<S> Clone for ReadOnlyState<S> {
    fn clone(&self) -> Self {
        Self {
            holder: self.holder.clone(),
        }
    }
}

impl<S> ReadOnlyState<S>
where
    S: Send + Sync + 'static,
{
    /// Current snapshot
    pub fn current(&self) -> Arc<S> {
        self.holder.current()
    }

    /// Number of snapshots published since creation
    pub fn version(&self) -> u64 {
        self.holder.version()
    }

    /// Whether the underlying holder was closed
    pub fn is_closed(&self) -> bool {
        self.holder.is_closed()
    }

    /// See [`StateHolder::subscribe`]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Arc<S>) + Send + Sync + 'static,
    {
        self.holder.subscribe(callback)
    }

    /// See [`StateHolder::changes`]
    pub fn changes(&self) -> StateStream<S> {
        self.holder.changes()
    }

    /// See [`StateHolder::derive`]
    pub fn derive<K, T, Sel, Comp>(&self, select: Sel, compute: Comp) -> DerivedState<T>
    where
        K: PartialEq + Send + 'static,
        T: PartialEq + Send + Sync + 'static,
        Sel: Fn(&S) -> K + Send + Sync + 'static,
        Comp: Fn(&K) -> T + Send + Sync + 'static,
    {
        self.holder.derive(select, compute)
    }
}

impl<S> fmt::Debug for ReadOnlyState<S>
where
    S: fmt::Debug + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnlyState").field(&self.holder).finish()
    }
}

/// Handle to a registered callback
///
/// Dropping the handle, or calling [`unsubscribe`](Self::unsubscribe),
/// removes the callback from its holder.
pub struct Subscription {
    id: u64,
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new(id: u64, detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            id,
            detach: Some(Box::new(detach)),
        }
    }

    /// Identifier unique within the holder
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the callback from its holder
    pub fn unsubscribe(mut self) {
        self.detach_now();
    }

    fn detach_now(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.detach.is_some())
            .finish()
    }
}
