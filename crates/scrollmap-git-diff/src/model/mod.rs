//! Data model for git-diff markers.

pub mod hunk;
pub mod item;

pub use hunk::LineDiffHunk;
pub use item::{MarkerKind, VisualItem};
