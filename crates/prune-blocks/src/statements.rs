//! Line-scoped statement edits.
//!
//! These rules handle isolated declarations (a field, an import, a single
//! call) and never look past a line terminator. Multi-line bodies belong to
//! the [`BlockRemover`](crate::BlockRemover).

use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::lines::{content, is_blank, terminator};
use crate::mask::KeepMask;

/// Drops every line whose content matches a pattern.
#[derive(Debug, Clone)]
pub struct LineRule {
    pattern: Regex,
}

impl LineRule {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether the line's content, without terminator, matches.
    pub fn matches(&self, line: &str) -> bool {
        self.pattern.is_match(content(line))
    }
}

/// Replaces pattern matches inside each line.
#[derive(Debug, Clone)]
pub struct Substitution {
    pattern: Regex,
    replacement: String,
    drop_emptied: bool,
}

impl Substitution {
    /// `replacement` may refer to capture groups as `$1` or `${name}`.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
            drop_emptied: false,
        })
    }

    /// Drop a line the substitution leaves blank, instead of keeping an
    /// empty line behind.
    pub fn dropping_emptied(mut self, drop: bool) -> Self {
        self.drop_emptied = drop;
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Apply to one line. `None` means the line should be dropped.
    pub fn apply(&self, line: &str) -> Option<String> {
        let text = content(line);
        if !self.pattern.is_match(text) {
            return Some(line.to_owned());
        }
        let replaced = self.pattern.replace_all(text, self.replacement.as_str());
        if self.drop_emptied && is_blank(&replaced) && !is_blank(text) {
            return None;
        }
        Some(format!("{}{}", replaced, terminator(line)))
    }
}

/// Lines produced by a statement pass, with one hit count per rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementEdit {
    pub lines: Vec<String>,
    pub hits: Vec<usize>,
}

/// Drop lines matching any rule. A line counts towards the first rule that
/// matches it.
///
/// # Example
/// ```
/// use prune_blocks::statements::{drop_lines, LineRule};
///
/// let rules = [LineRule::new(r"^\s*source: string;$").unwrap()];
/// let edit = drop_lines(&["\tname: string;\n", "\tsource: string;\n"], &rules);
/// assert_eq!(edit.lines, vec!["\tname: string;\n"]);
/// assert_eq!(edit.hits, vec![1]);
/// ```
pub fn drop_lines<S: AsRef<str>>(lines: &[S], rules: &[LineRule]) -> StatementEdit {
    let mut hits = vec![0; rules.len()];
    let mut mask = KeepMask::new(lines.len());

    for (index, line) in lines.iter().enumerate() {
        if let Some(rule) = rules.iter().position(|r| r.matches(line.as_ref())) {
            hits[rule] += 1;
            mask.drop_line(index);
        }
    }
    debug!(dropped = mask.dropped(), "line rules applied");

    StatementEdit {
        lines: mask.apply(lines),
        hits,
    }
}

/// Apply substitutions to every line, in rule order. A rule's hit count is
/// the number of lines it changed or dropped.
pub fn substitute<S: AsRef<str>>(lines: &[S], rules: &[Substitution]) -> StatementEdit {
    let mut hits = vec![0; rules.len()];
    let mut out = Vec::with_capacity(lines.len());

    'lines: for line in lines {
        let mut current = line.as_ref().to_owned();
        for (index, rule) in rules.iter().enumerate() {
            match rule.apply(&current) {
                Some(next) => {
                    if next != current {
                        hits[index] += 1;
                        current = next;
                    }
                }
                None => {
                    hits[index] += 1;
                    continue 'lines;
                }
            }
        }
        out.push(current);
    }
    debug!(total = hits.iter().sum::<usize>(), "substitutions applied");

    StatementEdit { lines: out, hits }
}
