//! Visual marker items consumed by the overview-strip renderer.

/// Classification of a marked row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Lines present in the working file but not the revision.
    Added,
    /// Lines present in the revision but not the working file.
    Removed,
    /// Lines changed between revision and working file.
    Modified,
}

impl MarkerKind {
    /// Stable string form, useful for CSS-class style theming on the host side.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerKind::Added => "added",
            MarkerKind::Removed => "removed",
            MarkerKind::Modified => "modified",
        }
    }
}

/// One row to mark in the overview strip.
///
/// Ephemeral: recomputed on every render pass, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualItem {
    /// Screen row (post soft-wrap/fold translation), 0-based.
    pub row: u32,
    /// Marker classification.
    pub kind: MarkerKind,
}

impl VisualItem {
    /// Create a new item.
    pub fn new(row: u32, kind: MarkerKind) -> Self {
        Self { row, kind }
    }
}
