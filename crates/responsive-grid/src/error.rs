#![forbid(unsafe_code)]

//! Configuration errors.
//!
//! Every error here is a programmer or configuration mistake, never a
//! transient failure: they are raised before any transition logic runs and
//! leave the previous engine state untouched.

use thiserror::Error;

/// A rejected configuration or lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The breakpoint table has no entries, so no width can be classified.
    #[error("breakpoint table is empty")]
    EmptyBreakpoints,

    /// A stored layout is keyed by a breakpoint the table does not define.
    #[error("layout key `{breakpoint}` is not a defined breakpoint")]
    UnknownLayoutBreakpoint { breakpoint: String },

    /// The explicit breakpoint override names an undefined breakpoint.
    #[error("breakpoint override `{breakpoint}` is not a defined breakpoint")]
    UnknownBreakpointOverride { breakpoint: String },

    /// The resolved breakpoint has no column count.
    #[error("no column count defined for breakpoint `{breakpoint}`")]
    MissingColumns { breakpoint: String },

    /// A column count of zero.
    #[error("column count for breakpoint `{breakpoint}` must be positive")]
    ZeroColumns { breakpoint: String },

    /// A stored grid item fails shape constraints.
    #[error("item `{id}` in layout `{breakpoint}` is invalid: {reason}")]
    InvalidItem {
        breakpoint: String,
        id: String,
        reason: String,
    },

    /// Two items in one stored layout share an id.
    #[error("layout `{breakpoint}` contains duplicate item id `{id}`")]
    DuplicateItem { breakpoint: String, id: String },

    /// Two live items share an id.
    #[error("live item id `{id}` appears more than once")]
    DuplicateLiveItem { id: String },

    /// A live item declares an unusable size or bounds.
    #[error("size hint for live item `{id}` is invalid: {reason}")]
    InvalidHint { id: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offender() {
        let err = ConfigError::MissingColumns {
            breakpoint: "xl".to_string(),
        };
        assert_eq!(err.to_string(), "no column count defined for breakpoint `xl`");

        let err = ConfigError::InvalidItem {
            breakpoint: "lg".to_string(),
            id: "a".to_string(),
            reason: "size 0x1 must be at least 1x1".to_string(),
        };
        assert!(err.to_string().contains("item `a` in layout `lg`"));
    }
}
