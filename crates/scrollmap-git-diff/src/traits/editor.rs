//! Contract for the host text editor.

use std::path::PathBuf;

use crate::event::Subscription;

/// Stable identity of a live editor, used as the registry key.
pub type EditorId = u64;

/// The host text editor for one pane/buffer.
///
/// Notification hooks return a [`Subscription`]; the host must stop invoking
/// the callback once that subscription is disposed.
pub trait TextEditor {
    /// Stable identity for the lifetime of the editor.
    fn id(&self) -> EditorId;

    /// Path of the underlying file, `None` for unsaved/new buffers.
    fn path(&self) -> Option<PathBuf>;

    /// Full current buffer text.
    fn buffer_text(&self) -> String;

    /// Whether the underlying buffer has been disposed.
    fn is_destroyed(&self) -> bool;

    /// Translate a buffer row to a screen row (soft wrap, folds).
    fn screen_row_for_buffer_row(&self, row: u32) -> u32;

    /// The file path changed (save-as, rename).
    fn on_did_change_path(&self, callback: Box<dyn Fn()>) -> Subscription;

    /// The buffer settled after edits. Debounced by the host.
    fn on_did_stop_changing(&self, callback: Box<dyn Fn()>) -> Subscription;

    /// The editor is being destroyed.
    fn on_did_destroy(&self, callback: Box<dyn Fn()>) -> Subscription;
}
