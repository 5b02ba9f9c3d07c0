#![forbid(unsafe_code)]

//! Fetch-or-derive a layout for a breakpoint.
//!
//! An authored layout for the target breakpoint always wins and is returned
//! as an independent copy. Otherwise a basis layout is borrowed from the
//! nearest wider breakpoint that has one, or from the breakpoint that was
//! active before the transition, rescaled to the target column count and
//! compacted.
//!
//! # Failure Modes
//!
//! None. With nothing to derive from, the result is an empty layout.

use std::collections::BTreeMap;

use crate::breakpoint::{Breakpoints, ColumnMap};
use crate::compact::{CompactType, compact, correct_bounds};
use crate::item::{GridItem, Layout};

/// Persisted per-breakpoint layouts, owned by the host.
pub type LayoutsByBreakpoint = BTreeMap<String, Layout>;

/// Return the layout to show at `target`.
///
/// `fallback` is the breakpoint active before this transition; `columns` is
/// the target column count. `cols` is consulted only for the column count the
/// basis layout was authored against.
#[must_use]
pub fn find_or_generate(
    layouts: &LayoutsByBreakpoint,
    breakpoints: &Breakpoints,
    cols: &ColumnMap,
    target: &str,
    fallback: &str,
    columns: u32,
    compact_type: CompactType,
) -> Layout {
    if let Some(stored) = layouts.get(target) {
        tracing::debug!(
            target: "grid.responsive",
            breakpoint = target,
            items = stored.len(),
            "using authored layout"
        );
        return stored.clone();
    }

    let basis = breakpoints
        .wider_than(target)
        .into_iter()
        .find_map(|name| layouts.get(name).map(|layout| (name, layout)))
        .or_else(|| layouts.get(fallback).map(|layout| (fallback, layout)));

    let Some((source, basis)) = basis else {
        tracing::debug!(
            target: "grid.responsive",
            breakpoint = target,
            "no layout to derive from, starting empty"
        );
        return Layout::new();
    };

    tracing::debug!(
        target: "grid.responsive",
        breakpoint = target,
        source,
        items = basis.len(),
        "deriving layout"
    );

    let scaled = match cols.get(source) {
        Some(from) if from > 0 && from != columns => scale_layout(basis, from, columns),
        _ => basis.clone(),
    };
    compact(&correct_bounds(&scaled, columns), compact_type, columns)
}

/// Rescale horizontal coordinates from `from` columns to `to` columns.
///
/// `x` and `w` are scaled proportionally and rounded to the nearest cell;
/// widths stay at least one cell and items are kept inside the grid. `y` and
/// `h` are untouched.
#[must_use]
pub fn scale_layout(layout: &[GridItem], from: u32, to: u32) -> Layout {
    let to = to.max(1);
    let (num, den) = (u64::from(to), u64::from(from.max(1)));
    let scale = |v: u32| -> u32 {
        let scaled = (u64::from(v) * num * 2 + den) / (den * 2);
        u32::try_from(scaled).unwrap_or(u32::MAX)
    };

    layout
        .iter()
        .map(|item| {
            let mut item = item.clone();
            item.w = scale(item.w).clamp(1, to);
            item.x = scale(item.x).min(to - item.w);
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Layout {
        vec![
            GridItem::new("a", 0, 0, 6, 2),
            GridItem::new("b", 6, 0, 6, 2),
            GridItem::new("c", 0, 2, 12, 1),
        ]
    }

    fn generate(layouts: &LayoutsByBreakpoint, target: &str, fallback: &str) -> Layout {
        let cols = ColumnMap::default();
        let columns = cols.get(target).unwrap();
        find_or_generate(
            layouts,
            &Breakpoints::default(),
            &cols,
            target,
            fallback,
            columns,
            CompactType::Vertical,
        )
    }

    #[test]
    fn authored_layout_round_trips() {
        let layouts = LayoutsByBreakpoint::from([("lg".to_string(), sample())]);
        assert_eq!(generate(&layouts, "lg", "lg"), sample());
    }

    #[test]
    fn authored_layout_is_a_copy() {
        let layouts = LayoutsByBreakpoint::from([("lg".to_string(), sample())]);
        let mut out = generate(&layouts, "lg", "lg");
        out[0].x = 9;
        assert_eq!(layouts["lg"][0].x, 0);
    }

    #[test]
    fn derives_from_nearest_wider_breakpoint() {
        let layouts = LayoutsByBreakpoint::from([
            ("lg".to_string(), vec![GridItem::new("lg-only", 0, 0, 1, 1)]),
            ("md".to_string(), vec![GridItem::new("a", 5, 0, 5, 1)]),
        ]);
        let out = generate(&layouts, "sm", "lg");
        assert_eq!(out, vec![GridItem::new("a", 3, 0, 3, 1)]);
    }

    #[test]
    fn scales_to_fewer_columns() {
        let layouts = LayoutsByBreakpoint::from([("lg".to_string(), sample())]);
        let out = generate(&layouts, "sm", "lg");
        assert_eq!(out[0], GridItem::new("a", 0, 0, 3, 2));
        assert_eq!(out[1], GridItem::new("b", 3, 0, 3, 2));
        assert_eq!(out[2], GridItem::new("c", 0, 2, 6, 1));
    }

    #[test]
    fn falls_back_to_previous_breakpoint() {
        let layouts = LayoutsByBreakpoint::from([(
            "xs".to_string(),
            vec![GridItem::new("a", 0, 3, 2, 1)],
        )]);
        // Nothing wider than sm is stored, so the xs layout is the basis.
        let out = generate(&layouts, "sm", "xs");
        assert_eq!(out, vec![GridItem::new("a", 0, 0, 3, 1)]);
    }

    #[test]
    fn empty_when_nothing_stored() {
        assert!(generate(&LayoutsByBreakpoint::new(), "md", "lg").is_empty());
    }

    #[test]
    fn scale_keeps_items_inside_grid() {
        let out = scale_layout(&[GridItem::new("a", 11, 4, 1, 3)], 12, 2);
        assert_eq!(out[0], GridItem::new("a", 1, 4, 1, 3));
    }
}
