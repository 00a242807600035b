//! The provider surface handed to the overview-strip rendering host.
//!
//! The host calls [`ScrollmapProvider::subscribe`] once per editor it wants
//! markers for and pulls the current item list with
//! [`ScrollmapProvider::items`] whenever the update signal fires (or on its
//! own render cadence). Everything in between (repository discovery, change
//! listeners, diff caching) is handled here.
//!
//! Resolution tasks are spawned with `tokio::task::spawn_local`, so the
//! provider must be driven from within a [`tokio::task::LocalSet`].

use std::rc::Rc;
use std::time::Duration;

use crate::config::ConfigHandle;
use crate::event::{Subscription, SubscriptionSet, UpdateSignal};
use crate::mapper::map_hunks;
use crate::model::VisualItem;
use crate::registry::{EditorEntry, EditorRegistry};
use crate::subscription::RepositorySubscription;
use crate::traits::{EditorId, Project, TextEditor};

/// Which side of the editor the overview strip renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StripPosition {
    Left,
    #[default]
    Right,
}

/// Git-diff marker provider for a minimap/overview strip.
pub struct ScrollmapProvider {
    project: Rc<dyn Project>,
    config: ConfigHandle,
    registry: Rc<EditorRegistry>,
}

impl ScrollmapProvider {
    /// Create a provider over the host's project abstraction.
    pub fn new(project: Rc<dyn Project>, config: ConfigHandle) -> Self {
        Self {
            project,
            config,
            registry: Rc::new(EditorRegistry::new()),
        }
    }

    /// Provider identifier.
    pub fn name(&self) -> &'static str {
        "git"
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        "Git diff markers"
    }

    /// Preferred strip placement.
    pub fn position(&self) -> StripPosition {
        StripPosition::Right
    }

    /// Suggested render cadence. A hint to the rendering surface only; the
    /// provider itself is purely event-driven and never polls.
    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Live configuration handle.
    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Begin tracking `editor`. `update` is invoked (without payload)
    /// whenever the item list for this editor may have changed.
    ///
    /// Dropping the returned subscription stops tracking; the editor's own
    /// destruction signal does the same.
    pub fn subscribe(&self, editor: Rc<dyn TextEditor>, update: UpdateSignal) -> Subscription {
        let id = editor.id();
        log::debug!("tracking editor {id}");
        let subscription = RepositorySubscription::new(
            Rc::clone(&editor),
            Rc::clone(&self.project),
            update.clone(),
        );

        let mut listeners = SubscriptionSet::new();

        let weak = Rc::downgrade(&subscription);
        listeners.add(editor.on_did_change_path(Box::new(move || {
            if let Some(subscription) = weak.upgrade() {
                RepositorySubscription::spawn_resolution(&subscription);
            }
        })));

        let weak = Rc::downgrade(&subscription);
        listeners.add(editor.on_did_stop_changing(Box::new(move || {
            if let Some(subscription) = weak.upgrade() {
                RepositorySubscription::refresh(&subscription);
            }
        })));

        let weak = Rc::downgrade(&subscription);
        listeners.add(self.project.on_did_change_paths(Box::new(move || {
            if let Some(subscription) = weak.upgrade() {
                RepositorySubscription::spawn_resolution(&subscription);
            }
        })));

        {
            // A threshold change alone changes what `items` returns.
            let update = update.clone();
            listeners.add(self.config.on_did_change(move |_| update.notify()));
        }

        let registry = Rc::downgrade(&self.registry);
        listeners.add(editor.on_did_destroy(Box::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.unregister(id);
            }
        })));

        self.registry
            .register(id, EditorEntry::new(Rc::clone(&subscription), listeners));
        RepositorySubscription::spawn_resolution(&subscription);

        let registry = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.unregister(id);
            }
        })
    }

    /// Current item list for `editor_id`.
    ///
    /// Side-effect free; callable at any time after subscribe, including
    /// before the first resolution completes (yields an empty list, as does
    /// an unknown editor).
    pub fn items(&self, editor_id: EditorId) -> Vec<VisualItem> {
        let Some(subscription) = self.registry.subscription(editor_id) else {
            return Vec::new();
        };
        let threshold = self.config.threshold();
        let sub = subscription.borrow();
        let editor = Rc::clone(sub.editor());
        map_hunks(sub.cached_hunks(), threshold, |row| {
            editor.screen_row_for_buffer_row(row)
        })
    }

    /// Number of editors currently tracked.
    pub fn tracked_editors(&self) -> usize {
        self.registry.len()
    }

    /// Stop tracking every editor (package deactivation).
    pub fn dispose(&self) {
        self.registry.clear();
    }
}
