#![forbid(unsafe_code)]

//! Grid items, layouts, and the live item set they are reconciled against.
//!
//! A [`GridItem`] is one placed cell block in column/row units. A [`Layout`]
//! is an ordered list of items with unique ids; order carries no positional
//! meaning and only breaks ties during compaction.
//!
//! # Invariants
//!
//! 1. `w >= 1` and `h >= 1` for every valid item.
//! 2. When both bounds of an axis are present, `min <= max`.
//! 3. Ids are unique within a layout.
//!
//! Coordinates are unsigned, so `x >= 0` and `y >= 0` hold by construction.

use serde::{Deserialize, Serialize};

/// An ordered set of item placements for one breakpoint.
pub type Layout = Vec<GridItem>;

/// One positioned, sized block on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridItem {
    /// Identifier, unique within a layout.
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<u32>,
    /// Static items are never moved by compaction and act as obstacles.
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

impl GridItem {
    /// Create an unbounded, non-static item.
    #[must_use]
    pub fn new(id: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            min_w: None,
            max_w: None,
            min_h: None,
            max_h: None,
            is_static: false,
        }
    }

    /// Set width bounds (builder pattern).
    #[must_use]
    pub fn width_bounds(mut self, min_w: Option<u32>, max_w: Option<u32>) -> Self {
        self.min_w = min_w;
        self.max_w = max_w;
        self
    }

    /// Set height bounds (builder pattern).
    #[must_use]
    pub fn height_bounds(mut self, min_h: Option<u32>, max_h: Option<u32>) -> Self {
        self.min_h = min_h;
        self.max_h = max_h;
        self
    }

    /// Mark the item static (builder pattern).
    #[must_use]
    pub fn pinned(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Move the item (builder pattern).
    #[must_use]
    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Exclusive right edge.
    #[must_use]
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Whether two distinct items overlap. An item never collides with itself.
    #[must_use]
    pub fn collides(&self, other: &GridItem) -> bool {
        self.id != other.id
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Check shape constraints, returning a human-readable reason on failure.
    pub fn check_shape(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("empty id".to_string());
        }
        if self.w == 0 || self.h == 0 {
            return Err(format!("size {}x{} must be at least 1x1", self.w, self.h));
        }
        check_bounds("width", self.min_w, self.max_w)?;
        check_bounds("height", self.min_h, self.max_h)
    }

    /// Apply min/max bounds, then fit the item inside `cols` columns.
    ///
    /// Width is clamped to the grid width and `x` is pulled left so the item
    /// does not overflow the right edge.
    #[must_use]
    pub fn clamped(&self, cols: u32) -> Self {
        let cols = cols.max(1);
        let mut item = self.clone();
        item.w = clamp_axis(item.w, item.min_w, item.max_w).min(cols);
        item.h = clamp_axis(item.h, item.min_h, item.max_h);
        if item.right() > cols {
            item.x = cols - item.w;
        }
        item
    }
}

fn clamp_axis(value: u32, min: Option<u32>, max: Option<u32>) -> u32 {
    let mut value = value.max(min.unwrap_or(1)).max(1);
    if let Some(max) = max {
        value = value.min(max.max(1));
    }
    value
}

fn check_bounds(axis: &str, min: Option<u32>, max: Option<u32>) -> Result<(), String> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => {
            Err(format!("min {axis} {min} exceeds max {axis} {max}"))
        }
        (_, Some(0)) => Err(format!("max {axis} must be at least 1")),
        _ => Ok(()),
    }
}

/// Exclusive bottom edge of the whole layout (0 when empty).
#[must_use]
pub fn bottom(items: &[GridItem]) -> u32 {
    items.iter().map(GridItem::bottom).max().unwrap_or(0)
}

/// First item in `items` that overlaps `item`.
#[must_use]
pub fn first_collision<'a>(items: &'a [GridItem], item: &GridItem) -> Option<&'a GridItem> {
    items.iter().find(|other| item.collides(other))
}

// ---------------------------------------------------------------------------
// Live item set
// ---------------------------------------------------------------------------

/// Size and placement a rendered element declares for itself.
///
/// Used only when the element has no entry in the layout yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemHint {
    pub w: u32,
    pub h: u32,
    /// Explicit `(x, y)`; auto-placed when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<(u32, u32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<u32>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

impl ItemHint {
    /// A size-only hint.
    #[must_use]
    pub fn sized(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            position: None,
            min_w: None,
            max_w: None,
            min_h: None,
            max_h: None,
            is_static: false,
        }
    }

    /// Pin the hint to an explicit position (builder pattern).
    #[must_use]
    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.position = Some((x, y));
        self
    }

    /// Mark the declared item static (builder pattern).
    #[must_use]
    pub fn pinned(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Materialize the hint as an item at `(x, y)`.
    #[must_use]
    pub(crate) fn to_item(&self, id: &str, x: u32, y: u32) -> GridItem {
        GridItem {
            id: id.to_string(),
            x,
            y,
            w: self.w,
            h: self.h,
            min_w: self.min_w,
            max_w: self.max_w,
            min_h: self.min_h,
            max_h: self.max_h,
            is_static: self.is_static,
        }
    }
}

/// One currently rendered element, identified by its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<ItemHint>,
}

impl LiveItem {
    /// A live item with no declared size (defaults to 1x1).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hint: None,
        }
    }

    /// A live item with a declared size or placement.
    #[must_use]
    pub fn hinted(id: impl Into<String>, hint: ItemHint) -> Self {
        Self {
            id: id.into(),
            hint: Some(hint),
        }
    }
}

/// Build a live item set from bare ids.
#[must_use]
pub fn live_items<I, S>(ids: I) -> Vec<LiveItem>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(LiveItem::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collides_overlapping() {
        let a = GridItem::new("a", 0, 0, 2, 2);
        let b = GridItem::new("b", 1, 1, 2, 2);
        assert!(a.collides(&b));
        assert!(b.collides(&a));
    }

    #[test]
    fn adjacent_items_do_not_collide() {
        let a = GridItem::new("a", 0, 0, 2, 2);
        let right = GridItem::new("b", 2, 0, 1, 1);
        let below = GridItem::new("c", 0, 2, 1, 1);
        assert!(!a.collides(&right));
        assert!(!a.collides(&below));
    }

    #[test]
    fn item_never_collides_with_itself() {
        let a = GridItem::new("a", 0, 0, 2, 2);
        assert!(!a.collides(&a.clone()));
    }

    #[test]
    fn bottom_of_layout() {
        let layout = vec![GridItem::new("a", 0, 0, 1, 3), GridItem::new("b", 1, 2, 1, 4)];
        assert_eq!(bottom(&layout), 6);
        assert_eq!(bottom(&[]), 0);
    }

    #[test]
    fn clamped_pulls_overflow_left() {
        let item = GridItem::new("a", 10, 0, 4, 1).clamped(12);
        assert_eq!((item.x, item.w), (8, 4));
    }

    #[test]
    fn clamped_narrows_wide_items() {
        let item = GridItem::new("a", 3, 0, 20, 1).clamped(6);
        assert_eq!((item.x, item.w), (0, 6));
    }

    #[test]
    fn clamped_applies_bounds() {
        let item = GridItem::new("a", 0, 0, 1, 9)
            .width_bounds(Some(3), None)
            .height_bounds(None, Some(4))
            .clamped(12);
        assert_eq!((item.w, item.h), (3, 4));
    }

    #[test]
    fn shape_rejects_zero_size() {
        assert!(GridItem::new("a", 0, 0, 0, 1).check_shape().is_err());
        assert!(GridItem::new("a", 0, 0, 1, 0).check_shape().is_err());
        assert!(GridItem::new("", 0, 0, 1, 1).check_shape().is_err());
    }

    #[test]
    fn shape_rejects_inverted_bounds() {
        let item = GridItem::new("a", 0, 0, 2, 2).width_bounds(Some(4), Some(2));
        let reason = item.check_shape().unwrap_err();
        assert!(reason.contains("min width 4"));
    }

    #[test]
    fn static_flag_serializes_as_static() {
        let item = GridItem::new("a", 1, 2, 3, 4).pinned();
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"static\":true"));
        assert!(!json.contains("min_w"));
        let back: GridItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn live_items_from_ids() {
        let items = live_items(["a", "b"]);
        assert_eq!(items, vec![LiveItem::new("a"), LiveItem::new("b")]);
    }
}
