#![forbid(unsafe_code)]

//! Reconcile a layout with the set of currently rendered items.
//!
//! Entries for items that are no longer rendered are dropped; rendered items
//! without an entry are appended, either where their hint says or in the
//! first free cell. The result is then bounds-corrected and compacted.
//!
//! # Invariants
//!
//! 1. The output holds exactly the live ids, each once.
//! 2. Surviving entries keep their relative order; new entries follow them
//!    in live order.
//! 3. Synchronizing a synchronized layout against the same live set is a
//!    no-op.

use rustc_hash::FxHashSet;

use crate::compact::{CompactType, compact, correct_bounds};
use crate::item::{GridItem, Layout, LiveItem, bottom, first_collision};

/// Reconcile `layout` against `live` for a grid of `cols` columns.
#[must_use]
pub fn synchronize(
    layout: &[GridItem],
    live: &[LiveItem],
    cols: u32,
    compact_type: CompactType,
) -> Layout {
    let cols = cols.max(1);
    let live_ids: FxHashSet<&str> = live.iter().map(|item| item.id.as_str()).collect();

    let mut out: Layout = layout
        .iter()
        .filter(|item| live_ids.contains(item.id.as_str()))
        .cloned()
        .collect();
    let dropped = layout.len() - out.len();

    let mut present: FxHashSet<String> = out.iter().map(|item| item.id.clone()).collect();
    let mut added = 0usize;
    for live_item in live {
        if !present.insert(live_item.id.clone()) {
            continue;
        }
        let item = match &live_item.hint {
            Some(hint) => match hint.position {
                Some((x, y)) => hint.to_item(&live_item.id, x, y),
                None => {
                    let sized = hint.to_item(&live_item.id, 0, 0).clamped(cols);
                    let (x, y) = free_cell(&out, sized.w, sized.h, cols, compact_type);
                    sized.at(x, y)
                }
            },
            None => {
                let (x, y) = free_cell(&out, 1, 1, cols, compact_type);
                GridItem::new(live_item.id.as_str(), x, y, 1, 1)
            }
        };
        out.push(item);
        added += 1;
    }

    if added > 0 || dropped > 0 {
        tracing::debug!(
            target: "grid.responsive",
            added,
            dropped,
            cols,
            "layout synchronized with live items"
        );
    }

    compact(&correct_bounds(&out, cols), compact_type, cols)
}

/// Top-left-most cell where a `w`x`h` block fits without overlapping.
///
/// Scans row-major for vertical and no compaction, column-major for
/// horizontal. Falls back to the first row below the layout.
fn free_cell(
    layout: &[GridItem],
    w: u32,
    h: u32,
    cols: u32,
    compact_type: CompactType,
) -> (u32, u32) {
    let w = w.clamp(1, cols);
    let rows = bottom(layout);
    let fits = |x: u32, y: u32| first_collision(layout, &GridItem::new("", x, y, w, h)).is_none();
    let max_x = cols - w;

    // The first free cell in either scan order sits at the origin or flush
    // against an existing item's right or bottom edge.
    let xs = edges(layout.iter().map(GridItem::right), max_x);
    let found = match compact_type {
        CompactType::Horizontal => {
            let ys = edges(layout.iter().map(GridItem::bottom), rows.saturating_sub(h));
            xs.iter()
                .find_map(|&x| ys.iter().find(|&&y| fits(x, y)).map(|&y| (x, y)))
        }
        CompactType::Vertical | CompactType::None => {
            let ys: Vec<u32> = edges(layout.iter().map(GridItem::bottom), rows)
                .into_iter()
                .filter(|&y| y < rows)
                .collect();
            ys.iter()
                .find_map(|&y| xs.iter().find(|&&x| fits(x, y)).map(|&x| (x, y)))
        }
    };
    found.unwrap_or((0, rows))
}

/// Zero plus every edge up to `max`, ascending and deduplicated.
fn edges(found: impl Iterator<Item = u32>, max: u32) -> Vec<u32> {
    let mut out: Vec<u32> = std::iter::once(0).chain(found.filter(|&e| e <= max)).collect();
    out.sort_unstable();
    out.dedup();
    out
}
