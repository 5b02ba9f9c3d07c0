#![forbid(unsafe_code)]

//! Gap removal along one axis.
//!
//! [`compact`] pulls non-static items toward the top (vertical) or the left
//! (horizontal) edge in sorted order, treating static items and already
//! placed items as obstacles. [`CompactType::None`] only clamps items into
//! the column range.
//!
//! # Invariants
//!
//! 1. Output has the same ids in the same order as the input.
//! 2. Static items keep their position (apart from column clamping).
//! 3. With vertical or horizontal compaction, no two non-static items
//!    overlap and no non-static item overlaps a static one.
//! 4. Compaction is idempotent: compacting a compacted layout is a no-op.
//!
//! Sort order is row-major `(y, x)` for vertical and column-major `(x, y)`
//! for horizontal; ties keep input order. Every item ends either at the
//! edge or resting against an item that sorts before it, which is what
//! makes a second pass a no-op.

use serde::{Deserialize, Serialize};

use crate::item::{GridItem, Layout, bottom, first_collision};

/// Compaction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompactType {
    /// Pull items upward.
    #[default]
    Vertical,
    /// Pull items leftward.
    Horizontal,
    /// Leave positions alone beyond clamping into the grid.
    None,
}

impl CompactType {
    fn sort_key(self, item: &GridItem) -> (u32, u32) {
        match self {
            Self::Horizontal => (item.x, item.y),
            Self::Vertical | Self::None => (item.y, item.x),
        }
    }
}

impl std::fmt::Display for CompactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// Compact `layout` inside a grid of `cols` columns.
#[must_use]
pub fn compact(layout: &[GridItem], compact_type: CompactType, cols: u32) -> Layout {
    let mut out: Layout = layout.iter().map(|item| item.clamped(cols)).collect();
    if compact_type == CompactType::None {
        return out;
    }

    let mut order: Vec<usize> = (0..out.len()).collect();
    order.sort_by_key(|&idx| compact_type.sort_key(&out[idx]));

    let mut placed: Vec<GridItem> = out.iter().filter(|item| item.is_static).cloned().collect();
    for idx in order {
        if out[idx].is_static {
            continue;
        }
        let item = out[idx].clone();
        let item = match compact_type {
            CompactType::Horizontal => compact_leftward(&placed, item, cols.max(1)),
            CompactType::Vertical | CompactType::None => compact_upward(&placed, item),
        };
        placed.push(item.clone());
        out[idx] = item;
    }
    out
}

fn compact_upward(placed: &[GridItem], mut item: GridItem) -> GridItem {
    item.y = item.y.min(bottom(placed));
    while item.y > 0 && first_collision(placed, &item.clone().at(item.x, item.y - 1)).is_none() {
        item.y -= 1;
    }
    while let Some(obstacle) = first_collision(placed, &item) {
        item.y = obstacle.bottom();
    }
    item
}

fn compact_leftward(placed: &[GridItem], mut item: GridItem, cols: u32) -> GridItem {
    let mut wrapped = false;
    loop {
        while item.x > 0
            && first_collision(placed, &item.clone().at(item.x - 1, item.y)).is_none()
        {
            item.x -= 1;
        }
        let Some(obstacle) = first_collision(placed, &item) else {
            return item;
        };
        let next_x = obstacle.right();
        if next_x.saturating_add(item.w) <= cols {
            item.x = next_x;
            continue;
        }
        // Wrap and rescan from the right edge. Once rescans start at the
        // edge, rows whose set of crossing items is unchanged end the same
        // way, so skip straight to the next row where that set changes.
        item.y = if wrapped {
            next_band_change(placed, &item)
        } else {
            item.y.saturating_add(1)
        };
        item.x = cols - item.w;
        wrapped = true;
    }
}

/// Smallest `y` below the item's row at which some placed item starts or
/// stops crossing the rows `[y, y + h)`.
fn next_band_change(placed: &[GridItem], item: &GridItem) -> u32 {
    let (top, bottom) = (item.y, item.bottom());
    placed
        .iter()
        .filter(|other| other.id != item.id)
        .filter_map(|other| {
            if other.y < bottom && other.bottom() > top {
                Some(other.bottom())
            } else if other.y >= bottom {
                Some(other.y.saturating_add(1).saturating_sub(item.h))
            } else {
                None
            }
        })
        .min()
        .unwrap_or(top)
        .max(top.saturating_add(1))
}

/// Fit every item inside the grid and separate overlapping static items.
///
/// Items overflowing the right edge move left; a static item colliding with
/// an earlier static item moves down until free.
#[must_use]
pub fn correct_bounds(layout: &[GridItem], cols: u32) -> Layout {
    let mut statics: Vec<GridItem> = Vec::new();
    layout
        .iter()
        .map(|item| {
            let mut item = item.clamped(cols);
            if item.is_static {
                while let Some(obstacle) = first_collision(&statics, &item) {
                    item.y = obstacle.bottom();
                }
                statics.push(item.clone());
            }
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(layout: &[GridItem]) -> Vec<&str> {
        layout.iter().map(|i| i.id.as_str()).collect()
    }

    fn overlaps(layout: &[GridItem]) -> bool {
        layout
            .iter()
            .enumerate()
            .any(|(i, a)| layout[i + 1..].iter().any(|b| a.collides(b)))
    }

    #[test]
    fn vertical_pulls_items_up() {
        let layout = vec![GridItem::new("a", 0, 5, 2, 1), GridItem::new("b", 2, 9, 2, 2)];
        let out = compact(&layout, CompactType::Vertical, 12);
        assert_eq!((out[0].x, out[0].y), (0, 0));
        assert_eq!((out[1].x, out[1].y), (2, 0));
    }

    #[test]
    fn vertical_stacks_overlapping_items() {
        let layout = vec![GridItem::new("a", 0, 0, 2, 2), GridItem::new("b", 1, 0, 2, 3)];
        let out = compact(&layout, CompactType::Vertical, 12);
        assert_eq!(out[0].y, 0);
        assert_eq!(out[1].y, 2);
        assert!(!overlaps(&out));
    }

    #[test]
    fn output_keeps_input_order() {
        let layout = vec![
            GridItem::new("late", 0, 8, 1, 1),
            GridItem::new("early", 0, 0, 1, 1),
        ];
        let out = compact(&layout, CompactType::Vertical, 4);
        assert_eq!(ids(&out), vec!["late", "early"]);
        assert_eq!(out[1].y, 0);
        assert_eq!(out[0].y, 1);
    }

    #[test]
    fn static_items_are_obstacles() {
        let layout = vec![
            GridItem::new("wall", 0, 0, 4, 2).pinned(),
            GridItem::new("a", 0, 6, 2, 1),
        ];
        let out = compact(&layout, CompactType::Vertical, 4);
        assert_eq!((out[0].x, out[0].y), (0, 0));
        assert_eq!(out[1].y, 2);
    }

    #[test]
    fn static_items_do_not_move() {
        let layout = vec![GridItem::new("wall", 1, 4, 1, 1).pinned()];
        let out = compact(&layout, CompactType::Vertical, 4);
        assert_eq!(out, layout);
    }

    #[test]
    fn horizontal_pulls_items_left() {
        let layout = vec![GridItem::new("a", 3, 0, 1, 1), GridItem::new("b", 9, 0, 2, 1)];
        let out = compact(&layout, CompactType::Horizontal, 12);
        assert_eq!((out[0].x, out[0].y), (0, 0));
        assert_eq!((out[1].x, out[1].y), (1, 0));
    }

    #[test]
    fn horizontal_wraps_when_row_is_full() {
        let layout = vec![
            GridItem::new("a", 0, 0, 3, 1),
            GridItem::new("b", 0, 0, 2, 1),
        ];
        let out = compact(&layout, CompactType::Horizontal, 4);
        assert_eq!((out[0].x, out[0].y), (0, 0));
        assert_eq!((out[1].x, out[1].y), (0, 1));
        assert!(!overlaps(&out));
    }

    #[test]
    fn horizontal_wrap_skips_past_tall_static() {
        let layout = vec![
            GridItem::new("wall", 0, 0, 4, 20_000_000).pinned(),
            GridItem::new("a", 0, 0, 1, 1),
        ];
        let out = compact(&layout, CompactType::Horizontal, 4);
        assert_eq!((out[1].x, out[1].y), (0, 20_000_000));
        assert_eq!(compact(&out, CompactType::Horizontal, 4), out);

        let huge = vec![
            GridItem::new("wall", 0, 0, 4, u32::MAX - 1).pinned(),
            GridItem::new("a", 2, 0, 1, 1),
        ];
        let out = compact(&huge, CompactType::Horizontal, 4);
        assert_eq!((out[1].x, out[1].y), (0, u32::MAX - 1));
    }

    #[test]
    fn horizontal_wrap_stops_at_first_opening() {
        // Two staggered walls leave the first gap at row 3, right of "left".
        let layout = vec![
            GridItem::new("left", 0, 0, 2, 10).pinned(),
            GridItem::new("right", 2, 0, 2, 3).pinned(),
            GridItem::new("a", 0, 0, 2, 1),
        ];
        let out = compact(&layout, CompactType::Horizontal, 4);
        assert_eq!((out[2].x, out[2].y), (2, 3));
        assert!(!overlaps(&out));
    }

    #[test]
    fn none_only_clamps() {
        let layout = vec![GridItem::new("a", 10, 7, 4, 1), GridItem::new("b", 0, 3, 1, 1)];
        let out = compact(&layout, CompactType::None, 6);
        assert_eq!((out[0].x, out[0].y, out[0].w), (2, 7, 4));
        assert_eq!((out[1].x, out[1].y), (0, 3));
    }

    #[test]
    fn compacting_twice_is_noop() {
        let layout = vec![
            GridItem::new("a", 0, 4, 3, 2),
            GridItem::new("b", 2, 1, 2, 3),
            GridItem::new("c", 1, 9, 4, 1),
            GridItem::new("s", 3, 0, 1, 2).pinned(),
        ];
        for compact_type in [CompactType::Vertical, CompactType::Horizontal] {
            let once = compact(&layout, compact_type, 6);
            let twice = compact(&once, compact_type, 6);
            assert_eq!(once, twice, "{compact_type}");
            assert!(!overlaps(&once), "{compact_type}");
        }
    }

    #[test]
    fn correct_bounds_separates_statics() {
        let layout = vec![
            GridItem::new("s1", 0, 0, 2, 2).pinned(),
            GridItem::new("s2", 1, 1, 2, 2).pinned(),
        ];
        let out = correct_bounds(&layout, 12);
        assert_eq!(out[0].y, 0);
        assert_eq!(out[1].y, 2);
    }

    #[test]
    fn correct_bounds_clears_tall_static() {
        let layout = vec![
            GridItem::new("s1", 0, 0, 2, 3_000_000_000).pinned(),
            GridItem::new("s2", 1, 5, 1, 1).pinned(),
        ];
        let out = correct_bounds(&layout, 4);
        assert_eq!((out[1].x, out[1].y), (1, 3_000_000_000));
    }

    #[test]
    fn correct_bounds_pulls_overflow_left() {
        let out = correct_bounds(&[GridItem::new("a", 5, 0, 3, 1)], 6);
        assert_eq!(out[0].x, 3);
    }

    #[test]
    fn compact_type_serde_names() {
        assert_eq!(
            serde_json::to_string(&CompactType::Horizontal).unwrap(),
            "\"horizontal\""
        );
        let parsed: CompactType = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, CompactType::None);
    }
}
