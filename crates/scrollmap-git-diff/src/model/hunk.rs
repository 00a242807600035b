//! Line-diff hunk as reported by the repository collaborator.

use crate::model::MarkerKind;

/// One contiguous change region in the working file relative to a revision.
///
/// Produced wholesale by the repository's line-diff computation on every
/// refresh; never patched incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDiffHunk {
    /// Starting line in the new (working) file, 1-based.
    pub new_start: u32,
    /// Number of lines in the old version.
    pub old_lines: u32,
    /// Number of lines in the new version.
    pub new_lines: u32,
}

impl LineDiffHunk {
    /// Create a new hunk.
    pub fn new(new_start: u32, old_lines: u32, new_lines: u32) -> Self {
        Self {
            new_start,
            old_lines,
            new_lines,
        }
    }

    /// Create a pure addition hunk.
    pub fn added(new_start: u32, new_lines: u32) -> Self {
        Self::new(new_start, 0, new_lines)
    }

    /// Create a pure removal hunk (no corresponding new-file rows).
    pub fn removed(new_start: u32, old_lines: u32) -> Self {
        Self::new(new_start, old_lines, 0)
    }

    /// Create a modification hunk.
    pub fn modified(new_start: u32, old_lines: u32, new_lines: u32) -> Self {
        Self::new(new_start, old_lines, new_lines)
    }

    /// Classify this hunk for marker rendering.
    pub fn kind(&self) -> MarkerKind {
        if self.old_lines == 0 && self.new_lines > 0 {
            MarkerKind::Added
        } else if self.new_lines == 0 && self.old_lines > 0 {
            MarkerKind::Removed
        } else {
            MarkerKind::Modified
        }
    }

    /// Starting buffer row, 0-based. A hunk anchored before the first line
    /// clamps to row 0.
    pub fn start_row(&self) -> u32 {
        self.new_start.saturating_sub(1)
    }
}
