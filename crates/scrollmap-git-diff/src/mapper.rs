//! Pure mapping from line-diff hunks to visual marker items.

use crate::model::{LineDiffHunk, VisualItem};

/// Expand hunks into one marker item per changed row.
///
/// Rows are translated through `screen_row`, the host's buffer-row to
/// screen-row mapping (identity when soft-wrap and folding are off). A pure
/// removal has no rows in the working file, so it yields a single marker at
/// its (clamped) start row.
///
/// When `threshold` is non-zero and the expansion produces more items than
/// the threshold allows, the whole result is dropped and an empty list is
/// returned: the change set is too noisy for a per-line breakdown and the
/// host is expected to fall back to a coarser indicator. A threshold of `0`
/// means unlimited.
///
/// Items keep input hunk order. Overlapping rows from distinct hunks are not
/// deduplicated; line diffs are produced non-overlapping.
pub fn map_hunks(
    hunks: &[LineDiffHunk],
    threshold: usize,
    screen_row: impl Fn(u32) -> u32,
) -> Vec<VisualItem> {
    let mut items = Vec::new();
    for hunk in hunks {
        let kind = hunk.kind();
        let start = hunk.start_row();
        if hunk.new_lines > 0 {
            for row in start..start + hunk.new_lines {
                items.push(VisualItem::new(screen_row(row), kind));
            }
        } else {
            items.push(VisualItem::new(screen_row(start), kind));
        }
    }
    if threshold > 0 && items.len() > threshold {
        return Vec::new();
    }
    items
}
