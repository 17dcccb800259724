//! Derived State
//!
//! Read-only projections of a [`StateHolder`]. A derived view watches one
//! sub-value of its source and recomputes only when that sub-value changes,
//! so unrelated field changes never reach its subscribers.

use crate::state::holder::{Callback, ReadOnlyState, StateHolder, StateStream, Subscription};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Reactive projection of another state container
///
/// Stays attached to its source until dropped or [`detach`](Self::detach)ed.
pub struct DerivedState<T> {
    output: StateHolder<T>,
    recomputations: Arc<AtomicU64>,
    source: Option<Subscription>,
}

impl<T> DerivedState<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    pub(crate) fn from_source<S, K, Sel, Comp>(
        source: &StateHolder<S>,
        select: Sel,
        compute: Comp,
    ) -> Self
    where
        S: Send + Sync + 'static,
        K: PartialEq + Send + 'static,
        Sel: Fn(&S) -> K + Send + Sync + 'static,
        Comp: Fn(&K) -> T + Send + Sync + 'static,
    {
        // Seed and register atomically so no source update slips in between
        source.with_current_locked(|snapshot| {
            let key = select(snapshot);
            let output = StateHolder::new(compute(&key));
            let recomputations = Arc::new(AtomicU64::new(0));

            let last_key = Mutex::new(key);
            let sink = output.clone();
            let counter = Arc::clone(&recomputations);
            let callback: Callback<S> = Arc::new(move |snapshot: &Arc<S>| {
                let key = select(snapshot);
                let mut last = last_key.lock();
                if *last == key {
                    return;
                }
                let value = compute(&key);
                *last = key;
                drop(last);

                let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
                trace!(recomputations = count, "derived state recomputed");
                sink.set(value);
            });

            Self {
                output,
                recomputations,
                source: Some(source.register(callback)),
            }
        })
    }

    /// Current derived value
    pub fn current(&self) -> Arc<T> {
        self.output.current()
    }

    /// Number of published derived values since creation
    pub fn version(&self) -> u64 {
        self.output.version()
    }

    /// How many times the value was recomputed after the initial computation
    pub fn recompute_count(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }

    /// Whether the view still follows its source
    pub fn is_attached(&self) -> bool {
        self.source.is_some()
    }

    /// See [`StateHolder::subscribe`]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Arc<T>) + Send + Sync + 'static,
    {
        self.output.subscribe(callback)
    }

    /// See [`StateHolder::changes`]
    pub fn changes(&self) -> StateStream<T> {
        self.output.changes()
    }

    /// Read-only handle to the derived value
    pub fn read_only(&self) -> ReadOnlyState<T> {
        self.output.read_only()
    }

    /// Stop following the source; the last value is kept
    pub fn detach(&mut self) {
        if let Some(subscription) = self.source.take() {
            subscription.unsubscribe();
        }
    }
}

impl<T> fmt::Debug for DerivedState<T>
where
    T: fmt::Debug + PartialEq + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedState")
            .field("current", &self.output.current())
            .field("recomputations", &self.recompute_count())
            .field("attached", &self.is_attached())
            .finish()
    }
}
