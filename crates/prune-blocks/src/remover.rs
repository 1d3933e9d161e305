//! Block removal.
//!
//! Every identifier is located against the original buffer; the resulting
//! spans are marked in a single [`KeepMask`] which is applied once at the end.
//! Removing one block therefore never shifts the lines another identifier is
//! searched in.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::Result;
use crate::locator::{BlockLocator, Location};
use crate::mask::KeepMask;
use crate::outcome::{BlockOutcome, BlockStatus};
use crate::span::BlockSpan;
use crate::syntax::{AmbiguityPolicy, BlockSyntax};

/// Result of a removal pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// Surviving lines, in original order.
    pub lines: Vec<String>,
    /// One outcome per distinct requested identifier, in request order.
    pub outcomes: Vec<BlockOutcome>,
}

impl Removal {
    pub fn has_problems(&self) -> bool {
        self.outcomes.iter().any(BlockOutcome::is_problem)
    }

    pub fn outcome(&self, identifier: &str) -> Option<&BlockOutcome> {
        self.outcomes.iter().find(|o| o.identifier == identifier)
    }
}

/// Removes named blocks from line buffers.
#[derive(Debug, Clone, Default)]
pub struct BlockRemover {
    locator: BlockLocator,
}

impl BlockRemover {
    /// Create a remover for the given syntax.
    ///
    /// # Errors
    /// Returns an error when the markers are invalid or the declaration
    /// template does not compile.
    pub fn new(syntax: BlockSyntax) -> Result<Self> {
        Ok(Self {
            locator: BlockLocator::new(syntax)?,
        })
    }

    pub fn syntax(&self) -> &BlockSyntax {
        self.locator.syntax()
    }

    /// Work out what removing `identifiers` would do, without touching the
    /// buffer.
    ///
    /// A candidate block lying inside a block removed for another identifier
    /// goes with that block, so it does not make its own identifier
    /// ambiguous.
    pub fn inspect<S, I>(&self, lines: &[S], identifiers: I) -> Vec<BlockOutcome>
    where
        S: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let located: Vec<(String, Location)> = identifiers
            .into_iter()
            .filter(|id| seen.insert(id.as_ref().to_owned()))
            .map(|id| {
                let id = id.as_ref().to_owned();
                let location = self.locator.locate(lines, &id);
                (id, location)
            })
            .collect();

        let statuses = self.resolve(&located);
        located
            .into_iter()
            .zip(statuses)
            .map(|((identifier, _), status)| {
                log_status(&identifier, &status);
                BlockOutcome::new(identifier, status)
            })
            .collect()
    }

    /// Remove every block declared for one of `identifiers`.
    ///
    /// Identifiers without a block are ignored. Unterminated or ambiguous
    /// blocks are left in place and reported in the outcomes.
    ///
    /// # Example
    /// ```
    /// use prune_blocks::BlockRemover;
    ///
    /// let lines = ["keep();\n", "function drop() {\n", "  if (x) {\n", "  }\n", "}\n"];
    /// let removal = BlockRemover::default().remove(&lines, ["drop", "missing"]);
    /// assert_eq!(removal.lines, vec!["keep();\n"]);
    /// assert!(removal.outcome("drop").unwrap().is_removed());
    /// assert!(!removal.has_problems());
    /// ```
    pub fn remove<S, I>(&self, lines: &[S], identifiers: I) -> Removal
    where
        S: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let outcomes = self.inspect(lines, identifiers);

        let mut mask = KeepMask::new(lines.len());
        for span in outcomes.iter().flat_map(|o| o.removed_spans()) {
            mask.drop_span(*span);
        }
        debug!(
            dropped = mask.dropped(),
            total = lines.len(),
            "block removal applied"
        );

        Removal {
            lines: mask.apply(lines),
            outcomes,
        }
    }

    /// Settle every location into a status. Identifiers with several
    /// candidates are revisited until no more of them can be narrowed down
    /// by the blocks already being removed.
    fn resolve(&self, located: &[(String, Location)]) -> Vec<BlockStatus> {
        let remove_all = self.syntax().ambiguity == AmbiguityPolicy::All;
        let mut statuses: Vec<Option<BlockStatus>> = located
            .iter()
            .map(|(_, location)| match location {
                Location::Absent => Some(BlockStatus::Unmatched),
                Location::Unterminated { start } => {
                    Some(BlockStatus::Unterminated { start: *start })
                }
                Location::Found(spans) if spans.len() == 1 || remove_all => {
                    Some(BlockStatus::Removed {
                        spans: spans.clone(),
                    })
                }
                Location::Found(_) => None,
            })
            .collect();

        loop {
            let mut narrowed = false;
            for (index, (_, location)) in located.iter().enumerate() {
                let (None, Location::Found(spans)) = (&statuses[index], location) else {
                    continue;
                };
                let remaining = surviving(spans, index, &statuses);
                if remaining.len() <= 1 {
                    // No candidate left means every one is inside a removed block.
                    statuses[index] = Some(if remaining.is_empty() {
                        BlockStatus::Unmatched
                    } else {
                        BlockStatus::Removed { spans: remaining }
                    });
                    narrowed = true;
                }
            }
            if !narrowed {
                break;
            }
        }

        located
            .iter()
            .enumerate()
            .map(|(index, (_, location))| match (&statuses[index], location) {
                (Some(status), _) => status.clone(),
                (None, Location::Found(spans)) => BlockStatus::Ambiguous {
                    spans: surviving(spans, index, &statuses),
                },
                (None, _) => BlockStatus::Unmatched,
            })
            .collect()
    }
}

/// Candidate spans of identifier `owner` not enclosed by a block removed for
/// another identifier.
fn surviving(
    spans: &[BlockSpan],
    owner: usize,
    statuses: &[Option<BlockStatus>],
) -> Vec<BlockSpan> {
    let removed: Vec<&BlockSpan> = statuses
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != owner)
        .filter_map(|(_, status)| match status {
            Some(BlockStatus::Removed { spans }) => Some(spans),
            _ => None,
        })
        .flatten()
        .collect();
    spans
        .iter()
        .filter(|span| !removed.iter().any(|outer| outer.encloses(span)))
        .copied()
        .collect()
}

fn log_status(identifier: &str, status: &BlockStatus) {
    match status {
        BlockStatus::Unmatched => debug!(identifier, "no block found"),
        BlockStatus::Unterminated { start } => {
            warn!(identifier, line = start + 1, "block is never closed")
        }
        BlockStatus::Ambiguous { spans } => {
            warn!(identifier, matches = spans.len(), "ambiguous block match")
        }
        BlockStatus::Removed { .. } => {}
    }
}

/// Remove brace-delimited blocks using the default declaration heuristic.
///
/// # Arguments
/// * `lines` - The buffer, one entry per line with terminators kept
/// * `identifiers` - Names of the blocks to remove
///
/// # Returns
/// The surviving lines together with one outcome per identifier.
///
/// # Example
/// ```
/// use prune_blocks::remove_blocks;
///
/// let lines = [
///     "function a() {\n",
///     "  doThing();\n",
///     "}\n",
///     "function b() {\n",
///     "  if (x) {\n",
///     "    y();\n",
///     "  }\n",
///     "}\n",
/// ];
/// assert_eq!(remove_blocks(&lines, ["b"]).lines, &lines[..3]);
/// assert!(remove_blocks(&lines, ["a", "b"]).lines.is_empty());
/// ```
pub fn remove_blocks<S, I>(lines: &[S], identifiers: I) -> Removal
where
    S: AsRef<str>,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    BlockRemover::default().remove(lines, identifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_LOADERS: &str = "load() {\n}\nother();\nload() {\n}\n";

    fn lines(text: &str) -> Vec<&str> {
        text.split_inclusive('\n').collect()
    }

    #[test]
    fn test_empty_buffer() {
        let empty: [&str; 0] = [];
        let removal = remove_blocks(&empty, ["a"]);
        assert!(removal.lines.is_empty());
        assert_eq!(removal.outcomes[0].status, BlockStatus::Unmatched);
    }

    #[test]
    fn test_duplicate_identifiers_reported_once() {
        let buf = lines("a() {\n}\n");
        let removal = remove_blocks(&buf, ["a", "a"]);
        assert_eq!(removal.outcomes.len(), 1);
        assert!(removal.lines.is_empty());
    }

    #[test]
    fn test_ambiguous_skipped_by_default() {
        let buf = lines(TWO_LOADERS);
        let removal = remove_blocks(&buf, ["load"]);
        assert_eq!(removal.lines, buf);
        assert_eq!(
            removal.outcomes[0].status,
            BlockStatus::Ambiguous {
                spans: vec![BlockSpan::new(0, 2), BlockSpan::new(3, 5)]
            }
        );
        assert!(removal.has_problems());
    }

    #[test]
    fn test_candidate_inside_removed_block_is_not_ambiguous() {
        let buf = lines("onChange() {\n  syncFile(x, () => {\n  });\n}\nsyncFile(x) {\n}\nkeep();\n");
        let ids = ["onChange", "syncFile"];

        let once = remove_blocks(&buf, ids);
        assert_eq!(once.lines, vec!["keep();\n"]);
        assert_eq!(
            once.outcome("syncFile").unwrap().status,
            BlockStatus::Removed {
                spans: vec![BlockSpan::new(4, 6)]
            }
        );

        let twice = remove_blocks(&once.lines, ids);
        assert_eq!(twice.lines, once.lines);
    }

    #[test]
    fn test_candidates_narrowed_through_a_chain() {
        // `b` only becomes unique once `a` is removed, and `c` only once `b` is.
        let buf = lines(concat!(
            "a() {\n  b(() => {\n  });\n}\n",
            "b() {\n  c(() => {\n  });\n}\n",
            "c() {\n}\n",
        ));

        let removal = remove_blocks(&buf, ["c", "b", "a"]);

        assert!(removal.lines.is_empty());
        assert!(!removal.has_problems());
    }

    #[test]
    fn test_fully_enclosed_candidates_report_unmatched() {
        let buf = lines("outer() {\n  inner(() => {\n  });\n  inner(() => {\n  });\n}\n");

        let removal = remove_blocks(&buf, ["outer", "inner"]);

        assert!(removal.lines.is_empty());
        assert_eq!(
            removal.outcome("inner").unwrap().status,
            BlockStatus::Unmatched
        );
    }

    #[test]
    fn test_ambiguity_outside_removed_blocks_remains() {
        let buf = lines("a() {\n}\nb() {\n}\nb() {\n}\n");

        let removal = remove_blocks(&buf, ["a", "b"]);

        assert_eq!(removal.lines, vec!["b() {\n", "}\n", "b() {\n", "}\n"]);
        assert!(matches!(
            removal.outcome("b").unwrap().status,
            BlockStatus::Ambiguous { ref spans } if spans.len() == 2
        ));
    }

    #[test]
    fn test_ambiguous_all_removes_every_match() {
        let remover =
            BlockRemover::new(BlockSyntax::braces().with_ambiguity(AmbiguityPolicy::All)).unwrap();
        let buf = lines(TWO_LOADERS);
        let removal = remover.remove(&buf, ["load"]);
        assert_eq!(removal.lines, vec!["other();\n"]);
        assert!(!removal.has_problems());
    }

    #[test]
    fn test_unterminated_leaves_buffer_but_removes_others() {
        let buf = lines("ok() {\n}\nbroken() {\n  x();\n");
        let removal = remove_blocks(&buf, ["ok", "broken"]);
        assert_eq!(removal.lines, vec!["broken() {\n", "  x();\n"]);
        assert_eq!(
            removal.outcome("broken").unwrap().status,
            BlockStatus::Unterminated { start: 2 }
        );
    }

    #[test]
    fn test_inspect_does_not_need_mutation() {
        let buf = lines("a() {\n}\n");
        let outcomes = BlockRemover::default().inspect(&buf, ["a", "b"]);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_removed());
        assert_eq!(outcomes[1].status, BlockStatus::Unmatched);
    }
}
