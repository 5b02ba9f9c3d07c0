#![forbid(unsafe_code)]

//! Breakpoint tables and width classification.
//!
//! A [`Breakpoints`] table maps breakpoint names to minimum-width thresholds.
//! A [`ColumnMap`] maps the same names to column counts.
//!
//! # Usage
//!
//! ```
//! use responsive_grid::{Breakpoints, ColumnMap, resolve_breakpoint, resolve_columns};
//!
//! let breakpoints = Breakpoints::default();
//! let bp = resolve_breakpoint(&breakpoints, 1024).unwrap();
//! assert_eq!(bp, "md");
//! assert_eq!(resolve_columns(bp, &ColumnMap::default()).unwrap(), 10);
//! ```
//!
//! # Invariants
//!
//! 1. The resolved breakpoint's threshold is `<= width`, and no other
//!    breakpoint with threshold `<= width` has a larger threshold.
//! 2. When no threshold is `<= width`, the smallest-threshold entry wins.
//! 3. Resolution is deterministic: equal thresholds order by name.
//!
//! # Failure Modes
//!
//! - Empty table: [`ConfigError::EmptyBreakpoints`].
//! - Missing column entry: [`ConfigError::MissingColumns`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Breakpoint name to minimum-width threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakpoints {
    thresholds: BTreeMap<String, u32>,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::from_pairs([
            ("lg", 1200),
            ("md", 996),
            ("sm", 768),
            ("xs", 480),
            ("xxs", 0),
        ])
    }
}

impl Breakpoints {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            thresholds: BTreeMap::new(),
        }
    }

    /// Build a table from `(name, threshold)` pairs.
    #[must_use]
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            thresholds: pairs.into_iter().map(|(n, t)| (n.into(), t)).collect(),
        }
    }

    /// Add or replace a breakpoint (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, threshold: u32) -> Self {
        self.thresholds.insert(name.into(), threshold);
        self
    }

    /// Threshold for a named breakpoint.
    #[must_use]
    pub fn threshold(&self, name: &str) -> Option<u32> {
        self.thresholds.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.thresholds.contains_key(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Entries ordered by threshold, smallest first. Ties order by name.
    #[must_use]
    pub fn ascending(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .thresholds
            .iter()
            .map(|(name, &t)| (name.as_str(), t))
            .collect();
        entries.sort_by_key(|&(_, t)| t);
        entries
    }

    /// Entries ordered by threshold, largest first. Ties order by name.
    #[must_use]
    pub fn descending(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .thresholds
            .iter()
            .map(|(name, &t)| (name.as_str(), t))
            .collect();
        entries.sort_by_key(|&(_, t)| std::cmp::Reverse(t));
        entries
    }

    /// Names of breakpoints wider than `name`, nearest first.
    ///
    /// Empty when `name` is undefined or already the widest.
    #[must_use]
    pub fn wider_than(&self, name: &str) -> Vec<&str> {
        let ascending = self.ascending();
        match ascending.iter().position(|&(n, _)| n == name) {
            Some(idx) => ascending[idx + 1..].iter().map(|&(n, _)| n).collect(),
            None => Vec::new(),
        }
    }
}

/// Breakpoint name to column count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMap {
    cols: BTreeMap<String, u32>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::from_pairs([("lg", 12), ("md", 10), ("sm", 6), ("xs", 4), ("xxs", 2)])
    }
}

impl ColumnMap {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cols: BTreeMap::new(),
        }
    }

    /// Build a map from `(name, cols)` pairs.
    #[must_use]
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            cols: pairs.into_iter().map(|(n, c)| (n.into(), c)).collect(),
        }
    }

    /// Add or replace an entry (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, cols: u32) -> Self {
        self.cols.insert(name.into(), cols);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<u32> {
        self.cols.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.cols.iter().map(|(n, &c)| (n.as_str(), c))
    }
}

/// Classify `width` into a breakpoint name.
///
/// Walks the table from the largest threshold down and returns the first
/// breakpoint whose threshold fits; falls back to the smallest threshold.
pub fn resolve_breakpoint(breakpoints: &Breakpoints, width: u32) -> Result<&str, ConfigError> {
    let descending = breakpoints.descending();
    let name = descending
        .iter()
        .find(|&&(_, threshold)| threshold <= width)
        .or_else(|| descending.last())
        .map(|&(name, _)| name)
        .ok_or(ConfigError::EmptyBreakpoints)?;

    tracing::trace!(
        target: "grid.responsive",
        width,
        breakpoint = name,
        "breakpoint resolved"
    );
    Ok(name)
}

/// Column count for a breakpoint.
pub fn resolve_columns(breakpoint: &str, cols: &ColumnMap) -> Result<u32, ConfigError> {
    match cols.get(breakpoint) {
        Some(0) => Err(ConfigError::ZeroColumns {
            breakpoint: breakpoint.to_string(),
        }),
        Some(n) => Ok(n),
        None => Err(ConfigError::MissingColumns {
            breakpoint: breakpoint.to_string(),
        }),
    }
}
