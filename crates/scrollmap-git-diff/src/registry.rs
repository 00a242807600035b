//! Process-wide map from editor identity to its subscription context.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::event::SubscriptionSet;
use crate::subscription::RepositorySubscription;
use crate::traits::EditorId;

/// Everything owned on behalf of one tracked editor: the repository
/// subscription plus the editor/project/config listeners wired at subscribe
/// time.
pub struct EditorEntry {
    subscription: Rc<RefCell<RepositorySubscription>>,
    listeners: SubscriptionSet,
}

impl EditorEntry {
    /// Bundle a subscription with its listener set.
    pub fn new(
        subscription: Rc<RefCell<RepositorySubscription>>,
        listeners: SubscriptionSet,
    ) -> Self {
        Self {
            subscription,
            listeners,
        }
    }
}

/// Registry of tracked editors.
///
/// Ownership of each [`EditorEntry`] is registry-exclusive: entries are
/// inserted on subscribe and removed when the editor's destruction signal
/// fires (or the host unsubscribes). Removal always disposes the entry's
/// listeners before the map entry goes away, so a detached callback can never
/// deliver events into a dangling context.
#[derive(Default)]
pub struct EditorRegistry {
    entries: RefCell<HashMap<EditorId, EditorEntry>>,
}

impl EditorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the context for `id`. A leftover entry for the same editor is
    /// torn down first.
    pub fn register(&self, id: EditorId, entry: EditorEntry) {
        if self.entries.borrow().contains_key(&id) {
            log::debug!("replacing existing subscription for editor {id}");
            self.unregister(id);
        }
        self.entries.borrow_mut().insert(id, entry);
    }

    /// Tear down and remove the context for `id`, if present.
    ///
    /// Disposal happens before removal: first the editor/project listeners,
    /// then the repository listener set, then the map entry. Safe to call
    /// from within one of the entry's own listener callbacks.
    pub fn unregister(&self, id: EditorId) {
        let subscription = {
            let mut entries = self.entries.borrow_mut();
            match entries.get_mut(&id) {
                Some(entry) => {
                    entry.listeners.clear();
                    Some(Rc::clone(&entry.subscription))
                }
                None => None,
            }
        };
        if let Some(subscription) = subscription {
            RepositorySubscription::dispose(&subscription);
            self.entries.borrow_mut().remove(&id);
            log::debug!("unregistered editor {id}");
        }
    }

    /// Look up the subscription for `id`.
    pub fn subscription(&self, id: EditorId) -> Option<Rc<RefCell<RepositorySubscription>>> {
        self.entries
            .borrow()
            .get(&id)
            .map(|entry| Rc::clone(&entry.subscription))
    }

    /// Whether `id` is currently tracked.
    pub fn contains(&self, id: EditorId) -> bool {
        self.entries.borrow().contains_key(&id)
    }

    /// Number of tracked editors.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether any editors are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Tear down every tracked editor (package deactivation).
    pub fn clear(&self) {
        let ids: Vec<EditorId> = self.entries.borrow().keys().copied().collect();
        for id in ids {
            self.unregister(id);
        }
    }
}
