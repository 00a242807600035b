//! # scrollmap-git-diff
//!
//! A standalone git-diff marker provider for editor minimap/overview strips.
//! It turns per-file line diffs into classified row markers (added, removed,
//! modified) and keeps them synchronized with live editing and repository
//! state changes.
//!
//! ## Design Principles
//!
//! This crate is designed to be **instrumented**: it consumes the host's
//! editor, repository, and project abstractions through traits and signals
//! render updates back through a callback, without touching any concrete
//! editor API or computing diffs itself. This enables:
//!
//! - Testability with scripted collaborators instead of a live editor
//! - Reusability across hosts (any buffer/VCS pairing that fits the traits)
//! - Clear separation of concerns: diffing stays in the repository, pixels
//!   stay in the rendering surface
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scrollmap_git_diff::{ConfigHandle, ScrollmapProvider, UpdateSignal};
//!
//! // The host implements Project / Repository / TextEditor.
//! let provider = ScrollmapProvider::new(project, ConfigHandle::default());
//!
//! // Track an editor; the signal fires whenever its markers may have changed.
//! let subscription = provider.subscribe(editor, UpdateSignal::new(move || {
//!     strip.request_render();
//! }));
//!
//! // Pull the current markers on each render pass.
//! for item in provider.items(editor_id) {
//!     strip.mark_row(item.row, item.kind.as_str());
//! }
//!
//! // Dropping the subscription (or destroying the editor) stops tracking.
//! drop(subscription);
//! ```
//!
//! Repository discovery runs as local async tasks, so the provider must be
//! driven from within a `tokio::task::LocalSet`.

pub mod config;
pub mod event;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod registry;
pub mod subscription;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{ConfigError, ConfigHandle, ScrollmapConfig};
pub use event::{Emitter, Subscription, SubscriptionSet, UpdateSignal};
pub use mapper::map_hunks;
pub use model::{LineDiffHunk, MarkerKind, VisualItem};
pub use provider::{ScrollmapProvider, StripPosition};
pub use registry::{EditorEntry, EditorRegistry};
pub use subscription::{BindState, PendingResolution, RepositorySubscription};
pub use traits::{EditorId, Project, Repository, TextEditor};
