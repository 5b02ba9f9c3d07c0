#![forbid(unsafe_code)]

//! Host configuration for a responsive grid.
//!
//! A [`ResponsiveConfig`] is plain data supplied by the host for every
//! transition. [`Default`] builds a fresh instance each call; there is no
//! shared default object.
//!
//! # Usage
//!
//! ```
//! use responsive_grid::{CompactType, ResponsiveConfig, live_items};
//!
//! let config = ResponsiveConfig::default()
//!     .with_width(1024)
//!     .with_compact_type(CompactType::Horizontal)
//!     .with_items(live_items(["a", "b"]));
//! assert!(config.validate().is_ok());
//! assert_eq!(config.resolution_width(), 1024);
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::breakpoint::{Breakpoints, ColumnMap};
use crate::compact::CompactType;
use crate::error::ConfigError;
use crate::generate::LayoutsByBreakpoint;
use crate::item::LiveItem;

/// Default horizontal and vertical gap between items.
pub const DEFAULT_MARGIN: [u32; 2] = [10, 10];
/// Default row height passed through to the renderer.
pub const DEFAULT_ROW_HEIGHT: u32 = 150;
/// Default container width.
pub const DEFAULT_WIDTH: u32 = 1280;

/// Everything the engine reads from the host for one transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveConfig {
    /// Breakpoint resolution table.
    pub breakpoints: Breakpoints,
    /// Columns per breakpoint.
    pub cols: ColumnMap,
    /// Authored layouts.
    pub layouts: LayoutsByBreakpoint,
    /// Container width.
    pub width: u32,
    /// Viewport width, used instead of `width` when
    /// `breakpoint_from_viewport` is set.
    pub viewport_width: Option<u32>,
    pub breakpoint_from_viewport: bool,
    /// Explicit breakpoint override; skips width classification.
    pub breakpoint: Option<String>,
    pub compact_type: CompactType,
    /// `[horizontal, vertical]` gap between items.
    pub margin: [u32; 2],
    /// `[horizontal, vertical]` container padding; the renderer uses the
    /// margin when unset.
    pub container_padding: Option<[u32; 2]>,
    pub row_height: u32,
    /// Currently rendered items.
    pub items: Vec<LiveItem>,
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            cols: ColumnMap::default(),
            layouts: LayoutsByBreakpoint::new(),
            width: DEFAULT_WIDTH,
            viewport_width: None,
            breakpoint_from_viewport: false,
            breakpoint: None,
            compact_type: CompactType::default(),
            margin: DEFAULT_MARGIN,
            container_padding: None,
            row_height: DEFAULT_ROW_HEIGHT,
            items: Vec::new(),
        }
    }
}

impl ResponsiveConfig {
    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    #[must_use]
    pub fn with_cols(mut self, cols: ColumnMap) -> Self {
        self.cols = cols;
        self
    }

    #[must_use]
    pub fn with_layouts(mut self, layouts: LayoutsByBreakpoint) -> Self {
        self.layouts = layouts;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Classify by viewport width instead of container width.
    #[must_use]
    pub fn with_viewport_width(mut self, viewport_width: u32) -> Self {
        self.viewport_width = Some(viewport_width);
        self.breakpoint_from_viewport = true;
        self
    }

    #[must_use]
    pub fn with_breakpoint(mut self, breakpoint: impl Into<String>) -> Self {
        self.breakpoint = Some(breakpoint.into());
        self
    }

    #[must_use]
    pub fn with_compact_type(mut self, compact_type: CompactType) -> Self {
        self.compact_type = compact_type;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: [u32; 2]) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_container_padding(mut self, padding: [u32; 2]) -> Self {
        self.container_padding = Some(padding);
        self
    }

    #[must_use]
    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: Vec<LiveItem>) -> Self {
        self.items = items;
        self
    }

    /// Width used for breakpoint classification.
    #[must_use]
    pub fn resolution_width(&self) -> u32 {
        if self.breakpoint_from_viewport {
            self.viewport_width.unwrap_or(self.width)
        } else {
            self.width
        }
    }

    /// Whether any input that feeds breakpoint or column resolution differs.
    #[must_use]
    pub fn width_inputs_differ(&self, other: &Self) -> bool {
        self.width != other.width
            || self.viewport_width != other.viewport_width
            || self.breakpoint_from_viewport != other.breakpoint_from_viewport
            || self.breakpoint != other.breakpoint
            || self.tables_differ(other)
    }

    /// Whether the breakpoint table or column map differs.
    #[must_use]
    pub fn tables_differ(&self, other: &Self) -> bool {
        self.breakpoints != other.breakpoints || self.cols != other.cols
    }

    /// Check the configuration before any transition uses it.
    ///
    /// Column lookups for the resolved breakpoint are checked later, when the
    /// breakpoint is known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.breakpoints.is_empty() {
            return Err(ConfigError::EmptyBreakpoints);
        }
        if let Some(bp) = &self.breakpoint {
            if !self.breakpoints.contains(bp) {
                return Err(ConfigError::UnknownBreakpointOverride {
                    breakpoint: bp.clone(),
                });
            }
        }
        if let Some((name, _)) = self.cols.iter().find(|&(_, c)| c == 0) {
            return Err(ConfigError::ZeroColumns {
                breakpoint: name.to_string(),
            });
        }

        for (breakpoint, layout) in &self.layouts {
            if !self.breakpoints.contains(breakpoint) {
                return Err(ConfigError::UnknownLayoutBreakpoint {
                    breakpoint: breakpoint.clone(),
                });
            }
            let mut seen = FxHashSet::default();
            for item in layout {
                item.check_shape()
                    .map_err(|reason| ConfigError::InvalidItem {
                        breakpoint: breakpoint.clone(),
                        id: item.id.clone(),
                        reason,
                    })?;
                if !seen.insert(item.id.as_str()) {
                    return Err(ConfigError::DuplicateItem {
                        breakpoint: breakpoint.clone(),
                        id: item.id.clone(),
                    });
                }
            }
        }

        let mut seen = FxHashSet::default();
        for live in &self.items {
            if !seen.insert(live.id.as_str()) {
                return Err(ConfigError::DuplicateLiveItem {
                    id: live.id.clone(),
                });
            }
            if let Some(hint) = &live.hint {
                hint.to_item(&live.id, 0, 0)
                    .check_shape()
                    .map_err(|reason| ConfigError::InvalidHint {
                        id: live.id.clone(),
                        reason,
                    })?;
            }
        }
        Ok(())
    }
}
