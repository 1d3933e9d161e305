//! Per-identifier removal outcomes.

use serde::Serialize;
use std::fmt;

use crate::span::BlockSpan;

/// What happened to one requested identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BlockStatus {
    /// The listed spans were dropped from the buffer.
    Removed { spans: Vec<BlockSpan> },
    /// No block declares the identifier. Informational only.
    Unmatched,
    /// The block opening at line index `start` never closes; nothing removed.
    Unterminated { start: usize },
    /// Several disjoint blocks match the identifier; nothing removed.
    Ambiguous { spans: Vec<BlockSpan> },
}

/// Outcome for a single identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockOutcome {
    pub identifier: String,
    #[serde(flatten)]
    pub status: BlockStatus,
}

impl BlockOutcome {
    pub fn new(identifier: impl Into<String>, status: BlockStatus) -> Self {
        Self {
            identifier: identifier.into(),
            status,
        }
    }

    /// Whether the caller should look at this outcome before trusting the result.
    pub fn is_problem(&self) -> bool {
        matches!(
            self.status,
            BlockStatus::Unterminated { .. } | BlockStatus::Ambiguous { .. }
        )
    }

    pub fn is_removed(&self) -> bool {
        matches!(self.status, BlockStatus::Removed { .. })
    }

    /// Spans dropped for this identifier.
    pub fn removed_spans(&self) -> &[BlockSpan] {
        match &self.status {
            BlockStatus::Removed { spans } => spans,
            _ => &[],
        }
    }
}

impl fmt::Display for BlockOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            BlockStatus::Removed { spans } => {
                write!(f, "{}: removed ", self.identifier)?;
                write_spans(f, spans)
            }
            BlockStatus::Unmatched => write!(f, "{}: not found", self.identifier),
            BlockStatus::Unterminated { start } => write!(
                f,
                "{}: block opening at line {} is never closed",
                self.identifier,
                start + 1
            ),
            BlockStatus::Ambiguous { spans } => {
                write!(f, "{}: ambiguous, matches ", self.identifier)?;
                write_spans(f, spans)
            }
        }
    }
}

fn write_spans(f: &mut fmt::Formatter<'_>, spans: &[BlockSpan]) -> fmt::Result {
    for (i, span) in spans.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", span)?;
    }
    Ok(())
}
