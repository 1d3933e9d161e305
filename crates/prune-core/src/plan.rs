//! Prune plan configuration model.

use std::path::{Path, PathBuf};

use prune_blocks::BlockSyntax;
use prune_fs::ConfigStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// File names searched, in order, when no plan path is given.
pub const PLAN_FILE_NAMES: &[&str] = &["prune.toml", "prune.json", "prune.yaml", "prune.yml"];

/// Everything one pruning run removes from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrunePlan {
    /// Names of the blocks to remove.
    pub blocks: Vec<String>,
    /// Outer syntax of the file.
    pub syntax: BlockSyntax,
    /// Single lines to drop.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<LineRuleSpec>,
    /// Text to rewrite inside lines.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub substitutions: Vec<SubstitutionSpec>,
}

/// Drop every line matching `pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineRuleSpec {
    pub pattern: String,
}

/// Replace `pattern` with `replacement` inside each line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubstitutionSpec {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
    /// Drop the line when the substitution leaves it blank.
    #[serde(default)]
    pub drop_emptied: bool,
}

impl LineRuleSpec {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl SubstitutionSpec {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            drop_emptied: false,
        }
    }
}

impl PrunePlan {
    /// A plan removing `blocks` with brace syntax.
    pub fn for_blocks<I, S>(blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blocks: blocks.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Load a plan file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self> {
        let plan: Self = ConfigStore::new().load(path)?;
        debug!(path = %path.display(), blocks = plan.blocks.len(), "plan loaded");
        Ok(plan)
    }

    /// Save the plan; the format follows the extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        Ok(())
    }

    /// Find the first plan file in `dir` named after [`PLAN_FILE_NAMES`].
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        PLAN_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Load the plan found by [`PrunePlan::discover`].
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = Self::discover(dir).ok_or_else(|| Error::PlanNotFound {
            dir: dir.to_path_buf(),
        })?;
        Self::load(&path)
    }

    /// Append block identifiers not already listed.
    pub fn add_blocks<I, S>(&mut self, blocks: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for block in blocks {
            let block = block.into();
            if !self.blocks.contains(&block) {
                self.blocks.push(block);
            }
        }
    }

    /// Check what serde cannot: identifiers must be non-blank.
    pub fn validate(&self) -> Result<()> {
        if let Some(blank) = self.blocks.iter().position(|b| b.trim().is_empty()) {
            return Err(Error::invalid_plan(format!(
                "block identifier #{} is blank",
                blank + 1
            )));
        }
        if let Some(padded) = self.blocks.iter().find(|b| b.trim() != b.as_str()) {
            return Err(Error::invalid_plan(format!(
                "block identifier '{}' has surrounding whitespace",
                padded
            )));
        }
        Ok(())
    }

    /// Whether running this plan could change anything.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.lines.is_empty() && self.substitutions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prune_blocks::AmbiguityPolicy;

    #[test]
    fn test_parse_full_plan_toml() {
        let plan: PrunePlan = toml::from_str(
            r#"
blocks = ["syncVaultToLetta", "onFileChange"]

[syntax]
declaration = '^\s*(?:private\s+)?async\s+{name}\('
ambiguity = "all"

[[lines]]
pattern = '^\s*sourceName: string;$'

[[substitutions]]
pattern = ' && this\.source'

[[substitutions]]
pattern = 'this\.source = null;'
drop_emptied = true
"#,
        )
        .unwrap();

        assert_eq!(plan.blocks, vec!["syncVaultToLetta", "onFileChange"]);
        assert_eq!(plan.syntax.open, "{");
        assert_eq!(plan.syntax.ambiguity, AmbiguityPolicy::All);
        assert_eq!(plan.lines.len(), 1);
        assert_eq!(plan.substitutions[0].replacement, "");
        assert!(plan.substitutions[1].drop_emptied);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<PrunePlan, _> = toml::from_str("functions = [\"a\"]");
        assert!(result.is_err());
    }

    #[test]
    fn test_add_blocks_deduplicates() {
        let mut plan = PrunePlan::for_blocks(["a"]);
        plan.add_blocks(["a", "b"]);
        assert_eq!(plan.blocks, vec!["a", "b"]);
    }

    #[test]
    fn test_validate_rejects_blank_identifier() {
        assert!(PrunePlan::for_blocks(["a", " "]).validate().is_err());
        assert!(PrunePlan::for_blocks([" a"]).validate().is_err());
        assert!(PrunePlan::for_blocks(["a"]).validate().is_ok());
    }

    #[test]
    fn test_discover_prefers_toml() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("prune.json"), "{}").unwrap();
        std::fs::write(temp.path().join("prune.toml"), "").unwrap();

        let found = PrunePlan::discover(temp.path()).unwrap();
        assert!(found.ends_with("prune.toml"));
    }

    #[test]
    fn test_load_from_dir_without_plan() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = PrunePlan::load_from_dir(temp.path()).unwrap_err();
        assert!(matches!(err, Error::PlanNotFound { .. }));
    }
}
