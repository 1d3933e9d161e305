//! The pruning pipeline.
//!
//! Each step takes the previous step's lines by reference and returns a new
//! sequence; nothing is edited in place.

use prune_blocks::{
    BlockOutcome, BlockRemover, LineRule, Substitution, drop_lines, substitute,
};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::plan::PrunePlan;
use crate::report::{PruneReport, RuleHits};

/// Lines produced by a run together with its report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneOutput {
    pub lines: Vec<String>,
    pub report: PruneReport,
}

/// A compiled [`PrunePlan`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    remover: BlockRemover,
    blocks: Vec<String>,
    line_rules: Vec<LineRule>,
    substitutions: Vec<Substitution>,
}

impl Pipeline {
    /// Validate the plan and compile every pattern in it.
    ///
    /// # Errors
    /// Returns an error for blank identifiers, invalid markers or a pattern
    /// that does not compile.
    pub fn from_plan(plan: &PrunePlan) -> Result<Self> {
        plan.validate()?;

        let remover = BlockRemover::new(plan.syntax.clone())?;
        let line_rules = plan
            .lines
            .iter()
            .map(|spec| LineRule::new(&spec.pattern))
            .collect::<prune_blocks::Result<Vec<_>>>()?;
        let substitutions = plan
            .substitutions
            .iter()
            .map(|spec| {
                Substitution::new(&spec.pattern, spec.replacement.as_str())
                    .map(|s| s.dropping_emptied(spec.drop_emptied))
            })
            .collect::<prune_blocks::Result<Vec<_>>>()?;

        debug!(
            blocks = plan.blocks.len(),
            lines = line_rules.len(),
            substitutions = substitutions.len(),
            "pipeline compiled"
        );

        Ok(Self {
            remover,
            blocks: plan.blocks.clone(),
            line_rules,
            substitutions,
        })
    }

    /// Block outcomes the run would produce, without transforming anything.
    pub fn inspect<S: AsRef<str>>(&self, lines: &[S]) -> Vec<BlockOutcome> {
        self.remover.inspect(lines, &self.blocks)
    }

    /// Run all steps over `lines`.
    ///
    /// # Example
    /// ```
    /// use prune_core::{Pipeline, PrunePlan, SubstitutionSpec};
    ///
    /// let mut plan = PrunePlan::for_blocks(["sync"]);
    /// plan.substitutions.push(SubstitutionSpec::new(r" && ready", ""));
    ///
    /// let lines = ["if (a && ready) {\n", "}\n", "sync() {\n", "}\n"];
    /// let output = Pipeline::from_plan(&plan).unwrap().run(&lines);
    ///
    /// assert_eq!(output.lines, vec!["if (a) {\n", "}\n"]);
    /// assert_eq!(output.report.lines_removed(), 2);
    /// ```
    pub fn run<S: AsRef<str>>(&self, lines: &[S]) -> PruneOutput {
        let removal = self.remover.remove(lines, &self.blocks);
        let dropped = drop_lines(&removal.lines, &self.line_rules);
        let substituted = substitute(&dropped.lines, &self.substitutions);

        let changed = substituted.lines.len() != lines.len()
            || substituted
                .lines
                .iter()
                .zip(lines)
                .any(|(after, before)| after != before.as_ref());

        let report = PruneReport {
            blocks: removal.outcomes,
            lines: hits(&self.line_rules, LineRule::pattern, dropped.hits),
            substitutions: hits(&self.substitutions, Substitution::pattern, substituted.hits),
            lines_before: lines.len(),
            lines_after: substituted.lines.len(),
            changed,
        };

        for problem in report.problems() {
            warn!(%problem, "block left in place");
        }
        info!(
            before = report.lines_before,
            after = report.lines_after,
            changed,
            "prune finished"
        );

        PruneOutput {
            lines: substituted.lines,
            report,
        }
    }
}

fn hits<R>(rules: &[R], pattern: fn(&R) -> &str, counts: Vec<usize>) -> Vec<RuleHits> {
    rules
        .iter()
        .zip(counts)
        .map(|(rule, hits)| RuleHits {
            pattern: pattern(rule).to_string(),
            hits,
        })
        .collect()
}
