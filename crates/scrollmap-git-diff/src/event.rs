//! Callback plumbing shared by the provider core and its collaborators.
//!
//! Everything here is single-threaded: subscriptions are `Rc`-based, handlers
//! run synchronously on the caller's stack, and disposal detaches a handler
//! immediately. Hosts implementing the collaborator traits can back their
//! `on_did_*` hooks with [`Emitter`] directly.

use std::cell::RefCell;
use std::rc::Rc;

type Handler<T> = Rc<dyn Fn(&T)>;

struct Handlers<T> {
    next_id: u64,
    entries: Vec<(u64, Handler<T>)>,
}

/// A single-threaded event emitter.
///
/// Handlers registered during an `emit` are not invoked for that emission;
/// handlers disposed during an `emit` may still receive it (the handler list
/// is snapshotted before dispatch so disposal never invalidates iteration).
pub struct Emitter<T> {
    inner: Rc<RefCell<Handlers<T>>>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Emitter<T> {
    /// Create an emitter with no handlers.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Handlers {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a handler. Dropping (or disposing) the returned subscription
    /// detaches it synchronously.
    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut handlers = self.inner.borrow_mut();
            let id = handlers.next_id;
            handlers.next_id += 1;
            handlers.entries.push((id, Rc::new(handler)));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Invoke every registered handler with `payload`.
    pub fn emit(&self, payload: &T) {
        let snapshot: Vec<Handler<T>> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in snapshot {
            handler(payload);
        }
    }

    /// Number of currently attached handlers.
    pub fn handler_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

/// A disposable handle to a registered listener.
///
/// Disposal runs at most once, either explicitly via [`Subscription::dispose`]
/// or implicitly on drop.
pub struct Subscription {
    disposer: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap a disposer closure.
    pub fn new(disposer: impl FnOnce() + 'static) -> Self {
        Self {
            disposer: Some(Box::new(disposer)),
        }
    }

    /// Detach the listener now.
    pub fn dispose(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

/// An owned group of subscriptions disposed together.
#[derive(Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a subscription.
    pub fn add(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Dispose every held subscription.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    /// Whether the set currently holds any subscriptions.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Number of held subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }
}

/// The render-request callback handed in by the host at subscribe time.
///
/// This is the whole of the update scheduling story: listener callbacks
/// invoke it whenever the item list for an editor may have changed. No
/// additional throttling happens here; buffer-stop-changing events are
/// already debounced by the host.
#[derive(Clone)]
pub struct UpdateSignal {
    notify: Rc<dyn Fn()>,
}

impl UpdateSignal {
    /// Wrap a render-request callback.
    pub fn new(notify: impl Fn() + 'static) -> Self {
        Self {
            notify: Rc::new(notify),
        }
    }

    /// Ask the host to re-render.
    pub fn notify(&self) {
        (self.notify)();
    }
}
