#![forbid(unsafe_code)]

//! Breakpoint resolution and layout reconciliation for responsive grids.
//!
//! The crate decides which breakpoint and column count apply to a container
//! width, which item arrangement to show at that breakpoint, and which host
//! callbacks fire, in which order, when the configuration changes. Rendering,
//! drag and resize are left to an external grid renderer that consumes
//! [`GridRenderProps`].
//!
//! # Usage
//!
//! ```
//! use responsive_grid::{NoopHandler, ResponsiveConfig, ResponsiveGrid, live_items};
//!
//! let config = ResponsiveConfig::default()
//!     .with_width(1300)
//!     .with_items(live_items(["a", "b"]));
//! let mut grid = ResponsiveGrid::new(config.clone(), NoopHandler).unwrap();
//! assert_eq!(grid.state().breakpoint, "lg");
//!
//! let state = grid.update(config.with_width(900)).unwrap();
//! assert_eq!((state.breakpoint.as_str(), state.cols), ("sm", 6));
//! assert_eq!(state.layout.len(), 2);
//! ```

pub mod breakpoint;
pub mod compact;
pub mod config;
pub mod controller;
pub mod error;
pub mod generate;
pub mod item;
pub mod sync;

pub use breakpoint::{Breakpoints, ColumnMap, resolve_breakpoint, resolve_columns};
pub use compact::{CompactType, compact, correct_bounds};
pub use config::ResponsiveConfig;
pub use controller::{
    Effect, EngineState, GridRenderProps, NoopHandler, ResponsiveGrid, ResponsiveHandler,
    Transition, handle_user_layout_change, initialize, on_config_change,
};
pub use error::ConfigError;
pub use generate::{LayoutsByBreakpoint, find_or_generate, scale_layout};
pub use item::{GridItem, ItemHint, Layout, LiveItem, live_items};
pub use sync::synchronize;
