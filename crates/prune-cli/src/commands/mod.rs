//! Command implementations

mod apply;
mod init;
mod spans;

pub use apply::{ApplyOptions, run_apply};
pub use init::run_init;
pub use spans::run_spans;

use std::path::{Path, PathBuf};

use prune_core::PrunePlan;
use tracing::debug;

use crate::cli::PlanArgs;
use crate::error::{CliError, Result};

/// Resolve a path given on the command line against the working directory.
pub(crate) fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Build the plan for a run: the explicit plan file, else one discovered in
/// `cwd`, else an empty brace-syntax plan; then add `--block` names.
pub(crate) fn load_plan(cwd: &Path, args: &PlanArgs) -> Result<PrunePlan> {
    let mut plan = match &args.plan {
        Some(path) => PrunePlan::load(&resolve(cwd, path))?,
        None => match PrunePlan::discover(cwd) {
            Some(found) => {
                debug!(path = %found.display(), "using discovered plan");
                PrunePlan::load(&found)?
            }
            None => PrunePlan::default(),
        },
    };
    plan.add_blocks(args.blocks.iter().cloned());

    if plan.is_empty() {
        return Err(CliError::user(
            "nothing to prune: pass --block NAME or provide a plan (see 'prune init')",
        ));
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(plan: Option<&str>, blocks: &[&str]) -> PlanArgs {
        PlanArgs {
            plan: plan.map(PathBuf::from),
            blocks: blocks.iter().map(|b| b.to_string()).collect(),
        }
    }

    #[test]
    fn test_load_plan_without_anything_fails() {
        let temp = TempDir::new().unwrap();
        let result = load_plan(temp.path(), &args(None, &[]));
        assert!(matches!(result, Err(CliError::User { .. })));
    }

    #[test]
    fn test_load_plan_from_blocks_only() {
        let temp = TempDir::new().unwrap();
        let plan = load_plan(temp.path(), &args(None, &["a", "b"])).unwrap();
        assert_eq!(plan.blocks, vec!["a", "b"]);
    }

    #[test]
    fn test_load_plan_discovers_and_merges() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("prune.toml"), "blocks = [\"a\"]\n").unwrap();

        let plan = load_plan(temp.path(), &args(None, &["a", "c"])).unwrap();

        assert_eq!(plan.blocks, vec!["a", "c"]);
    }

    #[test]
    fn test_explicit_plan_is_relative_to_cwd() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("plans")).unwrap();
        fs::write(temp.path().join("plans/strip.json"), r#"{"blocks": ["x"]}"#).unwrap();

        let plan = load_plan(temp.path(), &args(Some("plans/strip.json"), &[])).unwrap();

        assert_eq!(plan.blocks, vec!["x"]);
    }
}
