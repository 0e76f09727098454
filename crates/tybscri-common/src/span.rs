//! Source locations attached to syntax nodes.
//!
//! Spans are produced by the external parser and only consulted when a
//! diagnostic needs to be attributed to a place in the script. Resolution
//! logic never looks at them.

use serde::{Deserialize, Serialize};

/// A single position in the source text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Character offset from the start of the script.
    pub index: u32,
    /// 1-based line number.
    pub line: u32,
    /// 0-based column within the line.
    pub column: u32,
}

impl SourceLocation {
    pub const fn new(index: u32, line: u32, column: u32) -> Self {
        Self {
            index,
            line,
            column,
        }
    }
}

/// A `start`..`stop` range in the source text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub stop: SourceLocation,
}

impl SourceSpan {
    /// Span used for synthesized nodes that have no source text.
    pub const EMPTY: Self = Self {
        start: SourceLocation::new(0, 0, 0),
        stop: SourceLocation::new(0, 0, 0),
    };

    pub const fn new(start: SourceLocation, stop: SourceLocation) -> Self {
        Self { start, stop }
    }

    /// Length in characters; zero for inverted spans.
    pub const fn len(&self) -> u32 {
        self.stop.index.saturating_sub(self.start.index)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Self) -> Self {
        let start = if other.start.index < self.start.index {
            other.start
        } else {
            self.start
        };
        let stop = if other.stop.index > self.stop.index {
            other.stop
        } else {
            self.stop
        };
        Self { start, stop }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_orders_by_index() {
        let a = SourceSpan::new(SourceLocation::new(4, 1, 4), SourceLocation::new(7, 1, 7));
        let b = SourceSpan::new(SourceLocation::new(0, 1, 0), SourceLocation::new(5, 1, 5));
        let covered = a.cover(b);
        assert_eq!(covered.start.index, 0);
        assert_eq!(covered.stop.index, 7);
        assert_eq!(covered.len(), 7);
    }

    #[test]
    fn test_empty_span() {
        assert!(SourceSpan::EMPTY.is_empty());
    }
}
