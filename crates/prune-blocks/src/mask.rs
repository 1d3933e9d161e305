//! Keep-mask over a line buffer.

use crate::span::BlockSpan;

/// One flag per line; `true` keeps the line in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepMask {
    keep: Vec<bool>,
}

impl KeepMask {
    /// A mask keeping all `len` lines.
    pub fn new(len: usize) -> Self {
        Self {
            keep: vec![true; len],
        }
    }

    pub fn drop_span(&mut self, span: BlockSpan) {
        self.keep[span.start..span.end].fill(false);
    }

    pub fn drop_line(&mut self, index: usize) {
        self.keep[index] = false;
    }

    pub fn is_kept(&self, index: usize) -> bool {
        self.keep[index]
    }

    pub fn dropped(&self) -> usize {
        self.keep.iter().filter(|&&k| !k).count()
    }

    /// Copy the kept lines, in order.
    pub fn apply<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        debug_assert_eq!(lines.len(), self.keep.len());
        lines
            .iter()
            .zip(&self.keep)
            .filter(|(_, keep)| **keep)
            .map(|(line, _)| line.as_ref().to_owned())
            .collect()
    }
}
