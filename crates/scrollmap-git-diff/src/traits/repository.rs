//! Contract for the host repository abstraction.

use std::path::Path;

use crate::event::Subscription;
use crate::model::LineDiffHunk;

/// A version-control repository covering some directory tree.
///
/// The diff algorithm itself lives behind this trait; the provider core only
/// consumes its results.
pub trait Repository {
    /// Compute line diffs for `path` against its checked-in revision, using
    /// `text` as the working content.
    ///
    /// Returns `None` when no diff is available (untracked path, binary
    /// content, or identical to head). Callers treat that as an empty
    /// change set, not an error.
    fn line_diffs(&self, path: &Path, text: &str) -> Option<Vec<LineDiffHunk>>;

    /// Statuses changed in bulk (e.g. a checkout or index refresh).
    fn on_did_change_statuses(&self, callback: Box<dyn Fn()>) -> Subscription;

    /// The status of a single path changed.
    fn on_did_change_status(&self, callback: Box<dyn Fn(&Path)>) -> Subscription;

    /// The repository was destroyed (e.g. `.git` removed). Subscribers should
    /// re-resolve, since a replacement repository may cover the same paths.
    fn on_did_destroy(&self, callback: Box<dyn Fn()>) -> Subscription;
}
