//! End-to-end integration test for the whole prune flow
//!
//! Exercises plan discovery -> file loading -> pipeline run -> atomic write,
//! using the plugin fixture copied into a temporary project.

use pretty_assertions::assert_eq;
use prune_blocks::BlockStatus;
use prune_core::{Pipeline, PrunePlan};
use prune_fs::{read_lines, write_lines};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/plugin")
        .join(name)
}

/// Set up a project directory holding the plugin source and its plan.
fn setup_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("src")).unwrap();
    fs::copy(fixture("main.ts"), temp.path().join("src/main.ts")).unwrap();
    fs::copy(fixture("prune.toml"), temp.path().join("prune.toml")).unwrap();
    temp
}

/// Discover, load, run and write back, the way the CLI does.
fn prune_in_place(project: &Path, file: &Path) -> prune_core::PruneReport {
    let plan = PrunePlan::load_from_dir(project).unwrap();
    let pipeline = Pipeline::from_plan(&plan).unwrap();

    let input = read_lines(file).unwrap();
    let output = pipeline.run(input.as_slice());
    write_lines(file, &output.lines).unwrap();
    output.report
}

#[test]
fn test_prune_project_file() {
    let project = setup_project();
    let file = project.path().join("src/main.ts");

    let report = prune_in_place(project.path(), &file);

    assert!(report.changed);
    assert!(report.blocks.iter().all(|o| o.is_removed()));
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        fs::read_to_string(fixture("expected.ts")).unwrap()
    );
}

#[test]
fn test_second_run_is_a_no_op() {
    let project = setup_project();
    let file = project.path().join("src/main.ts");

    prune_in_place(project.path(), &file);
    let first = fs::read_to_string(&file).unwrap();
    let report = prune_in_place(project.path(), &file);

    assert!(report.is_unchanged());
    assert!(
        report
            .blocks
            .iter()
            .all(|o| o.status == BlockStatus::Unmatched)
    );
    assert_eq!(fs::read_to_string(&file).unwrap(), first);
}

#[test]
fn test_crlf_file_keeps_its_line_endings() {
    let project = setup_project();
    let file = project.path().join("src/main.ts");
    let crlf = fs::read_to_string(fixture("main.ts"))
        .unwrap()
        .replace('\n', "\r\n");
    fs::write(&file, crlf).unwrap();

    prune_in_place(project.path(), &file);

    let expected = fs::read_to_string(fixture("expected.ts"))
        .unwrap()
        .replace('\n', "\r\n");
    assert_eq!(fs::read_to_string(&file).unwrap(), expected);
}

#[test]
fn test_json_plan_is_discovered() {
    let temp = TempDir::new().unwrap();
    let plan = PrunePlan::load(&fixture("prune.toml")).unwrap();
    plan.save(&temp.path().join("prune.json")).unwrap();
    fs::copy(fixture("main.ts"), temp.path().join("main.ts")).unwrap();

    let discovered = PrunePlan::discover(temp.path()).unwrap();
    assert!(discovered.ends_with("prune.json"));

    prune_in_place(temp.path(), &temp.path().join("main.ts"));

    assert_eq!(
        fs::read_to_string(temp.path().join("main.ts")).unwrap(),
        fs::read_to_string(fixture("expected.ts")).unwrap()
    );
}

#[test]
fn test_unterminated_block_leaves_file_byte_identical() {
    let project = setup_project();
    let file = project.path().join("src/main.ts");
    let truncated: String = fs::read_to_string(fixture("main.ts"))
        .unwrap()
        .split_inclusive('\n')
        .take(40)
        .collect();
    fs::write(&file, &truncated).unwrap();

    let plan = PrunePlan::for_blocks(["syncVaultToAgent"]);
    let pipeline = Pipeline::from_plan(&plan).unwrap();
    let output = pipeline.run(read_lines(&file).unwrap().as_slice());

    assert!(output.report.has_problems());
    assert!(matches!(
        output.report.blocks[0].status,
        BlockStatus::Unterminated { .. }
    ));
    assert_eq!(output.lines.concat(), truncated);
}

#[test]
fn test_report_serializes_for_scripting() {
    let project = setup_project();
    let report = prune_in_place(project.path(), &project.path().join("src/main.ts"));

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["blocks"][0]["identifier"], "syncVaultToAgent");
    assert_eq!(json["blocks"][0]["status"], "removed");
    assert_eq!(json["lines_before"], 57);
    assert_eq!(json["lines_after"], 37);
}
