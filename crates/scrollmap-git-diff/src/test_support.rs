//! Mock collaborators for tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use async_trait::async_trait;

use crate::event::{Emitter, Subscription, UpdateSignal};
use crate::model::LineDiffHunk;
use crate::traits::{EditorId, Project, Repository, TextEditor};

/// An update signal that counts its invocations.
pub fn counting_signal() -> (UpdateSignal, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    let signal = {
        let count = Rc::clone(&count);
        UpdateSignal::new(move || count.set(count.get() + 1))
    };
    (signal, count)
}

/// Drive `future` on a current-thread runtime inside a `LocalSet`, the way a
/// host event loop would.
pub fn run_local<F: std::future::Future>(future: F) -> F::Output {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to build test runtime");
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, future)
}

/// Let spawned local tasks run to completion.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Scripted editor with externally drivable events.
pub struct MockEditor {
    id: EditorId,
    path: RefCell<Option<PathBuf>>,
    text: RefCell<String>,
    destroyed: Cell<bool>,
    /// Constant screen-row offset simulating soft wrap above the file top.
    pub screen_row_offset: Cell<u32>,
    pub path_changed: Emitter<()>,
    pub stopped_changing: Emitter<()>,
    pub destroyed_emitter: Emitter<()>,
}

impl MockEditor {
    pub fn new(id: EditorId, path: Option<&str>) -> Self {
        Self {
            id,
            path: RefCell::new(path.map(PathBuf::from)),
            text: RefCell::new(String::new()),
            destroyed: Cell::new(false),
            screen_row_offset: Cell::new(0),
            path_changed: Emitter::new(),
            stopped_changing: Emitter::new(),
            destroyed_emitter: Emitter::new(),
        }
    }

    /// Change the path and fire the path-changed event.
    pub fn set_path(&self, path: Option<&str>) {
        *self.path.borrow_mut() = path.map(PathBuf::from);
        self.path_changed.emit(&());
    }

    pub fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }

    /// Simulate the debounced post-edit event.
    pub fn emit_stopped_changing(&self) {
        self.stopped_changing.emit(&());
    }

    /// Destroy the editor and fire its destruction signal.
    pub fn destroy(&self) {
        self.destroyed.set(true);
        self.destroyed_emitter.emit(&());
    }

    /// Mark the buffer destroyed without firing the signal, for testing
    /// refreshes that race buffer teardown.
    pub fn destroy_silently(&self) {
        self.destroyed.set(true);
    }
}

impl TextEditor for MockEditor {
    fn id(&self) -> EditorId {
        self.id
    }

    fn path(&self) -> Option<PathBuf> {
        self.path.borrow().clone()
    }

    fn buffer_text(&self) -> String {
        self.text.borrow().clone()
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    fn screen_row_for_buffer_row(&self, row: u32) -> u32 {
        row + self.screen_row_offset.get()
    }

    fn on_did_change_path(&self, callback: Box<dyn Fn()>) -> Subscription {
        self.path_changed.subscribe(move |()| callback())
    }

    fn on_did_stop_changing(&self, callback: Box<dyn Fn()>) -> Subscription {
        self.stopped_changing.subscribe(move |()| callback())
    }

    fn on_did_destroy(&self, callback: Box<dyn Fn()>) -> Subscription {
        self.destroyed_emitter.subscribe(move |()| callback())
    }
}

/// Scripted repository serving canned line diffs per path.
pub struct MockRepository {
    diffs: RefCell<HashMap<PathBuf, Vec<LineDiffHunk>>>,
    line_diff_calls: Cell<usize>,
    last_text: RefCell<Option<String>>,
    pub statuses_changed: Emitter<()>,
    pub status_changed: Emitter<PathBuf>,
    pub destroyed: Emitter<()>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            diffs: RefCell::new(HashMap::new()),
            line_diff_calls: Cell::new(0),
            last_text: RefCell::new(None),
            statuses_changed: Emitter::new(),
            status_changed: Emitter::new(),
            destroyed: Emitter::new(),
        }
    }

    /// Script the diff result for `path`. Paths without an entry report no
    /// diff (untracked).
    pub fn set_line_diffs(&self, path: &str, hunks: Vec<LineDiffHunk>) {
        self.diffs.borrow_mut().insert(PathBuf::from(path), hunks);
    }

    /// How many times `line_diffs` has been called.
    pub fn line_diff_calls(&self) -> usize {
        self.line_diff_calls.get()
    }

    /// The buffer text passed to the most recent `line_diffs` call.
    pub fn last_text(&self) -> Option<String> {
        self.last_text.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn line_diffs(&self, path: &Path, text: &str) -> Option<Vec<LineDiffHunk>> {
        self.line_diff_calls.set(self.line_diff_calls.get() + 1);
        *self.last_text.borrow_mut() = Some(text.to_string());
        self.diffs.borrow().get(path).cloned()
    }

    fn on_did_change_statuses(&self, callback: Box<dyn Fn()>) -> Subscription {
        self.statuses_changed.subscribe(move |()| callback())
    }

    fn on_did_change_status(&self, callback: Box<dyn Fn(&Path)>) -> Subscription {
        self.status_changed.subscribe(move |path| callback(path))
    }

    fn on_did_destroy(&self, callback: Box<dyn Fn()>) -> Subscription {
        self.destroyed.subscribe(move |()| callback())
    }
}

/// Scripted project mapping directories to repositories.
pub struct MockProject {
    repositories: RefCell<HashMap<PathBuf, Rc<MockRepository>>>,
    resolution_calls: Cell<usize>,
    pub paths_changed: Emitter<()>,
}

impl MockProject {
    pub fn new() -> Self {
        Self {
            repositories: RefCell::new(HashMap::new()),
            resolution_calls: Cell::new(0),
            paths_changed: Emitter::new(),
        }
    }

    /// Register `repository` as covering `directory`.
    pub fn add_repository(&self, directory: &str, repository: Rc<MockRepository>) {
        self.repositories
            .borrow_mut()
            .insert(PathBuf::from(directory), repository);
    }

    /// Drop coverage for `directory`.
    pub fn remove_repository(&self, directory: &str) {
        self.repositories.borrow_mut().remove(Path::new(directory));
    }

    /// How many lookups have been performed.
    pub fn resolution_calls(&self) -> usize {
        self.resolution_calls.get()
    }
}

#[async_trait(?Send)]
impl Project for MockProject {
    async fn repository_for_directory(&self, directory: &Path) -> Option<Rc<dyn Repository>> {
        self.resolution_calls.set(self.resolution_calls.get() + 1);
        self.repositories
            .borrow()
            .get(directory)
            .map(|repo| Rc::clone(repo) as Rc<dyn Repository>)
    }

    fn on_did_change_paths(&self, callback: Box<dyn Fn()>) -> Subscription {
        self.paths_changed.subscribe(move |()| callback())
    }
}
