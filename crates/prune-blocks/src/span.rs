//! Block spans.

use serde::Serialize;
use std::fmt;

/// A half-open range `[start, end)` of line indices forming one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BlockSpan {
    pub start: usize,
    pub end: usize,
}

impl BlockSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "block span must cover at least one line");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }

    /// Whether `other` lies entirely within this span.
    pub fn encloses(&self, other: &BlockSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// 1-based number of the opening line.
    pub fn first_line(&self) -> usize {
        self.start + 1
    }

    /// 1-based number of the closing line.
    pub fn last_line(&self) -> usize {
        self.end
    }
}

impl fmt::Display for BlockSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == 1 {
            write!(f, "line {}", self.first_line())
        } else {
            write!(f, "lines {}-{}", self.first_line(), self.last_line())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(BlockSpan::new(3, 8).to_string(), "lines 4-8");
        assert_eq!(BlockSpan::new(0, 1).to_string(), "line 1");
    }

    #[test]
    fn test_encloses() {
        let outer = BlockSpan::new(2, 8);
        assert!(outer.encloses(&BlockSpan::new(3, 5)));
        assert!(outer.encloses(&outer));
        assert!(!outer.encloses(&BlockSpan::new(6, 9)));
    }

    #[test]
    fn test_contains_is_half_open() {
        let span = BlockSpan::new(2, 4);
        assert!(!span.contains(1));
        assert!(span.contains(2));
        assert!(span.contains(3));
        assert!(!span.contains(4));
    }
}
