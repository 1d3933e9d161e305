//! Block removal engine for Block Pruner.
//!
//! Removes named, delimiter-bounded blocks (typically function bodies) from a
//! line buffer without parsing the source language:
//!
//! ```text
//! function keep() {        kept
//! }                        kept
//! function drop() {        dropped  <- declaration names `drop` as a whole token
//!   if (x) {               dropped     depth 2
//!   }                      dropped     depth 1
//! }                        dropped     depth 0, block ends
//! ```
//!
//! Detection runs against the original buffer for every identifier before any
//! line is removed, so the order of identifiers never matters. Anomalies
//! (a block that never closes, several blocks for one name) are returned as
//! [`BlockOutcome`]s rather than raised.
//!
//! The `statements` module provides the line-scoped companions: dropping
//! single declaration lines and substituting text inside a line.
//!
//! Delimiters inside string or comment literals are counted like any other;
//! the engine offers no syntax validation.

pub mod error;
pub mod lines;
pub mod locator;
pub mod mask;
pub mod outcome;
pub mod remover;
pub mod span;
pub mod statements;
pub mod syntax;
pub mod token;

pub use error::{Error, Result};
pub use lines::LineBuffer;
pub use locator::{BlockLocator, Location};
pub use mask::KeepMask;
pub use outcome::{BlockOutcome, BlockStatus};
pub use remover::{BlockRemover, Removal, remove_blocks};
pub use span::BlockSpan;
pub use statements::{LineRule, StatementEdit, Substitution, drop_lines, substitute};
pub use syntax::{AmbiguityPolicy, BlockSyntax};
