//! Outer syntax of the buffer being pruned.
//!
//! The remover makes no assumption about the source language beyond what is
//! configured here: the marker strings that open and close a block body, an
//! optional declaration template, and what to do with ambiguous matches.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Placeholder standing for the block identifier in a declaration template.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// What to do when one identifier yields several disjoint blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguityPolicy {
    /// Report the match as ambiguous and remove nothing for it.
    #[default]
    Skip,
    /// Remove every matching block.
    All,
}

/// Marker and declaration configuration for block detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlockSyntax {
    /// Marker that increases nesting depth.
    pub open: String,
    /// Marker that decreases nesting depth.
    pub close: String,
    /// Regex a declaration line must match, with `{name}` standing for the
    /// identifier. When absent, any whole-token occurrence of the identifier
    /// that is not a member access opens the block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<String>,
    /// Handling of identifiers that match more than one block.
    pub ambiguity: AmbiguityPolicy,
}

impl Default for BlockSyntax {
    fn default() -> Self {
        Self::braces()
    }
}

impl BlockSyntax {
    /// Brace-delimited blocks with the default declaration heuristic.
    pub fn braces() -> Self {
        Self {
            open: "{".to_string(),
            close: "}".to_string(),
            declaration: None,
            ambiguity: AmbiguityPolicy::Skip,
        }
    }

    /// Set the declaration template.
    pub fn with_declaration(mut self, template: impl Into<String>) -> Self {
        self.declaration = Some(template.into());
        self
    }

    /// Set the ambiguity policy.
    pub fn with_ambiguity(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity = policy;
        self
    }

    /// Check that the markers can be counted unambiguously and that the
    /// declaration template names the identifier exactly once.
    pub fn validate(&self) -> Result<()> {
        if self.open.is_empty() || self.close.is_empty() {
            return Err(Error::syntax("open and close markers must not be empty"));
        }
        if self.open.contains(&self.close) || self.close.contains(&self.open) {
            return Err(Error::syntax(format!(
                "markers '{}' and '{}' overlap",
                self.open, self.close
            )));
        }
        if let Some(template) = &self.declaration {
            let placeholders = template.matches(NAME_PLACEHOLDER).count();
            if placeholders != 1 {
                return Err(Error::syntax(format!(
                    "declaration template must contain {} exactly once, found {}",
                    NAME_PLACEHOLDER, placeholders
                )));
            }
        }
        Ok(())
    }

    /// Net depth change contributed by `text`.
    pub fn depth_delta(&self, text: &str) -> isize {
        self.openers(text) as isize - self.closers(text) as isize
    }

    pub fn openers(&self, text: &str) -> usize {
        text.matches(self.open.as_str()).count()
    }

    pub fn closers(&self, text: &str) -> usize {
        text.matches(self.close.as_str()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braces_is_valid() {
        assert!(BlockSyntax::braces().validate().is_ok());
    }

    #[test]
    fn test_empty_marker_rejected() {
        let syntax = BlockSyntax {
            open: String::new(),
            ..BlockSyntax::braces()
        };
        assert!(syntax.validate().is_err());
    }

    #[test]
    fn test_overlapping_markers_rejected() {
        let syntax = BlockSyntax {
            open: "<".into(),
            close: "</".into(),
            ..BlockSyntax::braces()
        };
        assert!(syntax.validate().is_err());
    }

    #[test]
    fn test_template_needs_single_placeholder() {
        let missing = BlockSyntax::braces().with_declaration(r"^\s*fn\s+\(");
        assert!(missing.validate().is_err());

        let twice = BlockSyntax::braces().with_declaration("{name}{name}");
        assert!(twice.validate().is_err());

        let ok = BlockSyntax::braces().with_declaration(r"^\s*fn\s+{name}\(");
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_depth_delta() {
        let syntax = BlockSyntax::braces();
        assert_eq!(syntax.depth_delta("if (x) {"), 1);
        assert_eq!(syntax.depth_delta("} else {"), 0);
        assert_eq!(syntax.depth_delta("}}"), -2);
    }

    #[test]
    fn test_multi_char_markers() {
        let syntax = BlockSyntax {
            open: "begin".into(),
            close: "end;".into(),
            ..BlockSyntax::braces()
        };
        assert!(syntax.validate().is_ok());
        assert_eq!(syntax.depth_delta("procedure p; begin"), 1);
        assert_eq!(syntax.depth_delta("end;"), -1);
    }
}
