//! Per-editor repository binding and diff cache.
//!
//! Each tracked editor owns one [`RepositorySubscription`]. It discovers the
//! repository covering the editor's current path, listens for its change
//! notifications, and keeps a cache of the latest line diffs that the
//! provider's pull accessor reads from.
//!
//! Repository discovery is asynchronous and non-cancellable, so a lookup can
//! finish after the path has already moved on. Every (re)binding bumps a
//! generation counter at resolution start; a completed lookup is applied only
//! if the generation still matches, otherwise it is silently discarded (an
//! expected race, not a fault).

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::event::{SubscriptionSet, UpdateSignal};
use crate::model::LineDiffHunk;
use crate::traits::{Project, Repository, TextEditor};

/// Binding state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindState {
    /// No file path (unsaved buffer).
    Unbound,
    /// Path set, repository lookup in flight.
    Resolving,
    /// Repository found; change listeners active.
    Bound,
    /// Path set, but no repository covers it.
    Unrepoed,
}

/// Token capturing the path and generation at resolution start.
///
/// Handed back to [`RepositorySubscription::apply_resolution`] once the
/// lookup completes; a mismatched generation means the world changed while
/// the lookup was in flight and the result must be dropped.
#[derive(Debug)]
pub struct PendingResolution {
    generation: u64,
    path: PathBuf,
}

impl PendingResolution {
    /// Directory to resolve the repository for.
    pub fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// The tracked path this resolution was started for.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Per-editor state machine binding an editor to its repository.
pub struct RepositorySubscription {
    editor: Rc<dyn TextEditor>,
    project: Rc<dyn Project>,
    update: UpdateSignal,
    state: BindState,
    repository: Option<Rc<dyn Repository>>,
    file_path: Option<PathBuf>,
    cached_hunks: Vec<LineDiffHunk>,
    // At most one active listener set; always cleared before rebinding.
    repo_subscriptions: SubscriptionSet,
    generation: u64,
    disposed: bool,
}

impl RepositorySubscription {
    /// Create a subscription for `editor`. No resolution is started; call
    /// [`Self::spawn_resolution`] (or drive [`Self::resolve`]) to bind.
    pub fn new(
        editor: Rc<dyn TextEditor>,
        project: Rc<dyn Project>,
        update: UpdateSignal,
    ) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            editor,
            project,
            update,
            state: BindState::Unbound,
            repository: None,
            file_path: None,
            cached_hunks: Vec::new(),
            repo_subscriptions: SubscriptionSet::new(),
            generation: 0,
            disposed: false,
        }))
    }

    /// Current binding state.
    pub fn state(&self) -> BindState {
        self.state
    }

    /// The tracked file path, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// The bound repository, if any.
    pub fn repository(&self) -> Option<&Rc<dyn Repository>> {
        self.repository.as_ref()
    }

    /// Line diffs from the last refresh.
    pub fn cached_hunks(&self) -> &[LineDiffHunk] {
        &self.cached_hunks
    }

    /// The tracked editor.
    pub fn editor(&self) -> &Rc<dyn TextEditor> {
        &self.editor
    }

    /// Whether this subscription has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Enter the resolving state: detach any previous repository listeners,
    /// bump the generation, and capture the current path.
    ///
    /// Returns `None` when there is nothing to resolve (no path, or already
    /// disposed); in the no-path case the cache is cleared and the host is
    /// notified so stale markers disappear.
    pub fn begin_resolution(this: &Rc<RefCell<Self>>) -> Option<PendingResolution> {
        let (pending, update) = {
            let mut sub = this.borrow_mut();
            if sub.disposed {
                return None;
            }
            sub.repo_subscriptions.clear();
            sub.repository = None;
            sub.cached_hunks.clear();
            sub.generation += 1;
            match sub.editor.path() {
                Some(path) => {
                    log::debug!("resolving repository for {}", path.display());
                    sub.state = BindState::Resolving;
                    sub.file_path = Some(path.clone());
                    (
                        Some(PendingResolution {
                            generation: sub.generation,
                            path,
                        }),
                        None,
                    )
                }
                None => {
                    sub.state = BindState::Unbound;
                    sub.file_path = None;
                    (None, Some(sub.update.clone()))
                }
            }
        };
        if let Some(update) = update {
            update.notify();
        }
        pending
    }

    /// Apply a completed repository lookup, unless it is stale.
    pub fn apply_resolution(
        this: &Rc<RefCell<Self>>,
        pending: PendingResolution,
        repository: Option<Rc<dyn Repository>>,
    ) {
        {
            let sub = this.borrow();
            if sub.disposed || sub.generation != pending.generation {
                log::trace!(
                    "discarding stale repository resolution for {}",
                    pending.path.display()
                );
                return;
            }
        }
        match repository {
            Some(repository) => {
                log::debug!("repository bound for {}", pending.path.display());
                Self::bind(this, repository);
                Self::refresh(this);
            }
            None => {
                log::debug!("no repository covers {}", pending.path.display());
                let update = {
                    let mut sub = this.borrow_mut();
                    sub.state = BindState::Unrepoed;
                    sub.cached_hunks.clear();
                    sub.update.clone()
                };
                update.notify();
            }
        }
    }

    /// Run a full resolution cycle: capture state, look the repository up,
    /// apply the result if still current.
    pub async fn resolve(this: Rc<RefCell<Self>>, project: Rc<dyn Project>) {
        let Some(pending) = Self::begin_resolution(&this) else {
            return;
        };
        let repository = project.repository_for_directory(pending.directory()).await;
        Self::apply_resolution(&this, pending, repository);
    }

    /// Spawn a resolution cycle on the current thread's `LocalSet`.
    pub fn spawn_resolution(this: &Rc<RefCell<Self>>) {
        let project = {
            let sub = this.borrow();
            if sub.disposed {
                return;
            }
            Rc::clone(&sub.project)
        };
        let this = Rc::clone(this);
        tokio::task::spawn_local(async move {
            Self::resolve(this, project).await;
        });
    }

    fn bind(this: &Rc<RefCell<Self>>, repository: Rc<dyn Repository>) {
        let weak = Rc::downgrade(this);
        let mut sub = this.borrow_mut();
        // Never two active listener sets: a leftover set would keep
        // delivering a stale repository's events.
        sub.repo_subscriptions.clear();
        sub.state = BindState::Bound;
        sub.repository = Some(Rc::clone(&repository));

        let w = weak.clone();
        sub.repo_subscriptions
            .add(repository.on_did_change_statuses(Box::new(move || {
                if let Some(this) = w.upgrade() {
                    RepositorySubscription::refresh(&this);
                }
            })));

        let w = weak.clone();
        sub.repo_subscriptions
            .add(repository.on_did_change_status(Box::new(move |changed: &Path| {
                if let Some(this) = w.upgrade() {
                    let matches = this.borrow().file_path.as_deref() == Some(changed);
                    if matches {
                        RepositorySubscription::refresh(&this);
                    }
                }
            })));

        let w = weak;
        sub.repo_subscriptions
            .add(repository.on_did_destroy(Box::new(move || {
                if let Some(this) = w.upgrade() {
                    log::debug!("bound repository destroyed; re-resolving");
                    RepositorySubscription::spawn_resolution(&this);
                }
            })));
    }

    /// Recompute the cached line diffs from the current buffer text, then
    /// signal the host. The cache is always written before the signal fires,
    /// so a renderer pulling in response never sees stale data.
    pub fn refresh(this: &Rc<RefCell<Self>>) {
        let update = {
            let mut sub = this.borrow_mut();
            if sub.disposed {
                return;
            }
            sub.cached_hunks = sub.compute_hunks();
            sub.update.clone()
        };
        update.notify();
    }

    fn compute_hunks(&self) -> Vec<LineDiffHunk> {
        if self.editor.is_destroyed() {
            return Vec::new();
        }
        let (Some(repository), Some(path)) = (self.repository.as_ref(), self.file_path.as_ref())
        else {
            return Vec::new();
        };
        let text = self.editor.buffer_text();
        repository.line_diffs(path, &text).unwrap_or_default()
    }

    /// Tear the subscription down: detach repository listeners synchronously
    /// and invalidate any in-flight resolution. No further update signals are
    /// emitted after this returns.
    pub fn dispose(this: &Rc<RefCell<Self>>) {
        let mut sub = this.borrow_mut();
        if sub.disposed {
            return;
        }
        sub.disposed = true;
        sub.generation += 1;
        sub.repo_subscriptions.clear();
        sub.repository = None;
        sub.cached_hunks.clear();
        sub.state = BindState::Unbound;
    }
}
