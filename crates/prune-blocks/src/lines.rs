//! Line buffer handling.
//!
//! Lines keep their trailing terminator (`\n` or `\r\n`) so that joining the
//! surviving lines reproduces the untouched regions byte for byte.

use std::fmt;

/// An ordered sequence of text lines, each retaining its line terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Create a buffer from already split lines.
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split text into lines, keeping each line's terminator.
    ///
    /// # Example
    /// ```
    /// use prune_blocks::LineBuffer;
    ///
    /// let buffer = LineBuffer::from_text("a\r\nb\nc");
    /// assert_eq!(buffer.as_slice(), ["a\r\n", "b\n", "c"]);
    /// assert_eq!(buffer.to_text(), "a\r\nb\nc");
    /// ```
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_owned).collect(),
        }
    }

    /// Join the lines back into a single string.
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }
}

impl From<Vec<String>> for LineBuffer {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

impl From<&str> for LineBuffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl fmt::Display for LineBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            f.write_str(line)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a LineBuffer {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// The text of a line without its terminator.
pub fn content(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}

/// The terminator of a line (`"\n"`, `"\r\n"` or `""`).
pub fn terminator(line: &str) -> &str {
    &line[content(line).len()..]
}

/// Whether a line holds nothing but whitespace.
pub fn is_blank(line: &str) -> bool {
    content(line).trim().is_empty()
}
