//! Reporting for a pruning run.

use prune_blocks::BlockOutcome;
use serde::Serialize;

/// How many lines one statement rule touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHits {
    pub pattern: String,
    pub hits: usize,
}

/// What a pipeline run did, suitable for printing or JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    /// One outcome per requested block identifier.
    pub blocks: Vec<BlockOutcome>,
    /// Hit counts for the line rules, in plan order.
    pub lines: Vec<RuleHits>,
    /// Hit counts for the substitutions, in plan order.
    pub substitutions: Vec<RuleHits>,
    pub lines_before: usize,
    pub lines_after: usize,
    /// Whether the output differs from the input.
    pub changed: bool,
}

impl PruneReport {
    /// Whether any block was left in place because it was unterminated or
    /// ambiguous.
    pub fn has_problems(&self) -> bool {
        self.blocks.iter().any(BlockOutcome::is_problem)
    }

    pub fn problems(&self) -> impl Iterator<Item = &BlockOutcome> {
        self.blocks.iter().filter(|o| o.is_problem())
    }

    pub fn is_unchanged(&self) -> bool {
        !self.changed
    }

    pub fn lines_removed(&self) -> usize {
        self.lines_before.saturating_sub(self.lines_after)
    }

    /// Rules that never matched; usually a sign of a stale plan.
    pub fn unused_rules(&self) -> impl Iterator<Item = &RuleHits> {
        self.lines
            .iter()
            .chain(&self.substitutions)
            .filter(|r| r.hits == 0)
    }
}
