//! Block boundary detection.
//!
//! A block starts on a declaration line naming the identifier as a whole
//! token, with the opening marker after the name on that line or at the start
//! of the next non-blank line. It ends on the first line where the running
//! nesting depth, counted from the name onwards, falls back to zero.

use regex::Regex;
use tracing::trace;

use crate::error::Result;
use crate::lines::{content, is_blank};
use crate::span::BlockSpan;
use crate::syntax::{BlockSyntax, NAME_PLACEHOLDER};
use crate::token::{is_whole_token, token_positions};

/// Capture group the identifier is matched into inside a declaration template.
const NAME_GROUP: &str = "name";

/// Where the blocks for one identifier were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// No declaration line names the identifier.
    Absent,
    /// One or more disjoint, terminated blocks, in buffer order.
    Found(Vec<BlockSpan>),
    /// A block opened at `start` never closes before the end of the buffer.
    Unterminated { start: usize },
}

/// Finds block spans for identifiers under a given [`BlockSyntax`].
#[derive(Debug, Clone)]
pub struct BlockLocator {
    syntax: BlockSyntax,
    declaration: Option<Regex>,
}

impl BlockLocator {
    /// Validate the syntax and compile its declaration template.
    pub fn new(syntax: BlockSyntax) -> Result<Self> {
        syntax.validate()?;
        let declaration = syntax
            .declaration
            .as_deref()
            .map(|template| {
                let pattern = template.replace(
                    NAME_PLACEHOLDER,
                    &format!(r"(?P<{}>[A-Za-z0-9_$]+)", NAME_GROUP),
                );
                Regex::new(&pattern)
            })
            .transpose()?;
        Ok(Self {
            syntax,
            declaration,
        })
    }

    pub fn syntax(&self) -> &BlockSyntax {
        &self.syntax
    }

    /// Locate every block declared for `name`.
    ///
    /// Scanning resumes after each block found, so mentions of the name
    /// inside a block never count as a second block.
    pub fn locate<S: AsRef<str>>(&self, lines: &[S], name: &str) -> Location {
        let mut spans = Vec::new();
        let mut index = 0;

        while index < lines.len() {
            let Some(from) = self.opening_offset(lines, index, name) else {
                index += 1;
                continue;
            };

            match self.closing_index(lines, index, from) {
                Some(end) => {
                    let span = BlockSpan::new(index, end);
                    trace!(identifier = name, %span, "block located");
                    spans.push(span);
                    index = end;
                }
                None => return Location::Unterminated { start: index },
            }
        }

        if spans.is_empty() {
            Location::Absent
        } else {
            Location::Found(spans)
        }
    }

    /// Byte offset of the identifier when line `index` opens a block for it.
    fn opening_offset<S: AsRef<str>>(&self, lines: &[S], index: usize, name: &str) -> Option<usize> {
        let line = content(lines[index].as_ref());
        let start = self.declaration_offset(line, name)?;
        let rest = &line[start + name.len()..];

        if rest.contains(self.syntax.open.as_str()) {
            return Some(start);
        }
        if line.contains(self.syntax.open.as_str()) {
            // The only openers precede the name, so this is not its body.
            return None;
        }
        if !self.is_signature(line, start + name.len()) {
            return None;
        }

        let next = lines[index + 1..]
            .iter()
            .map(|l| l.as_ref())
            .find(|l| !is_blank(l))?;
        content(next)
            .trim_start()
            .starts_with(self.syntax.open.as_str())
            .then_some(start)
    }

    /// Whether a line without an opener can still declare a body that opens
    /// on a following line. Statements ending in `;` or `,` never do; without
    /// a declaration template the name must be followed by a parameter or
    /// generic list.
    fn is_signature(&self, line: &str, after_name: usize) -> bool {
        let line_end = line.trim_end();
        if line_end.ends_with(';') || line_end.ends_with(',') {
            return false;
        }
        self.declaration.is_some() || line[after_name..].trim_start().starts_with(['(', '<'])
    }

    fn declaration_offset(&self, line: &str, name: &str) -> Option<usize> {
        match &self.declaration {
            Some(regex) => regex
                .captures_iter(line)
                .filter_map(|caps| caps.name(NAME_GROUP))
                .find(|m| m.as_str() == name && is_whole_token(line, m.start(), m.len()))
                .map(|m| m.start()),
            None => token_positions(line, name).find(|&idx| !line[..idx].ends_with('.')),
        }
    }

    /// Exclusive end index of the block opening on line `start`, counting the
    /// opening line from byte offset `from`.
    fn closing_index<S: AsRef<str>>(&self, lines: &[S], start: usize, from: usize) -> Option<usize> {
        let mut depth: isize = 0;
        let mut opened = false;

        for (offset, line) in lines[start..].iter().enumerate() {
            let text = content(line.as_ref());
            let text = if offset == 0 { &text[from..] } else { text };

            opened |= self.syntax.openers(text) > 0;
            depth += self.syntax.depth_delta(text);

            if opened && depth <= 0 {
                return Some(start + offset + 1);
            }
        }

        None
    }
}

impl Default for BlockLocator {
    fn default() -> Self {
        Self {
            syntax: BlockSyntax::braces(),
            declaration: None,
        }
    }
}
