//! Prune plans and the pruning pipeline for Block Pruner
//!
//! A [`PrunePlan`] names the blocks to remove, the single-line statements to
//! drop and the in-line substitutions to apply. [`Pipeline`] compiles a plan
//! and runs it over a line buffer as a sequence of pure steps:
//!
//! 1. block removal, against the buffer as loaded
//! 2. line rules
//! 3. substitutions
//!
//! File I/O stays with the caller; see `prune-fs`.

pub mod error;
pub mod pipeline;
pub mod plan;
pub mod report;

pub use error::{Error, Result};
pub use pipeline::{Pipeline, PruneOutput};
pub use plan::{LineRuleSpec, PLAN_FILE_NAMES, PrunePlan, SubstitutionSpec};
pub use report::{PruneReport, RuleHits};
