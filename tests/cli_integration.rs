//! CLI integration tests for task-mermaid
//!
//! These tests run the binary end to end: reading task tables, writing the
//! diagram document and reporting structural issues.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command instance for the task-mermaid binary
fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("task-mermaid"))
}

/// Create a temporary directory holding a task table
fn setup_table(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    (dir, path)
}

const SIMPLE_TABLE: &str = "\
ID,Title,PreTask
B,Build,
E,Package,B
A,Design,
D,Review,A
C,Draft,A
";

// =============================================================================
// Convert Tests
// =============================================================================

#[test]
fn test_convert_writes_default_output() {
    let (dir, input) = setup_table("tasks.csv", SIMPLE_TABLE);

    cmd()
        .current_dir(dir.path())
        .arg("convert")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Wrote 5 edges in 2 branches to task-graph.md",
        ));

    let doc = fs::read_to_string(dir.path().join("task-graph.md")).unwrap();
    assert!(doc.starts_with("```mermaid\ngraph TB\n"));
    assert!(doc.ends_with("```\n"));
}

#[test]
fn test_convert_reads_workbook() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("plan.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (row, cells) in SIMPLE_TABLE.lines().enumerate() {
        for (col, cell) in cells.split(',').enumerate() {
            if !cell.is_empty() {
                sheet.write_string(row as u32, col as u16, cell).unwrap();
            }
        }
    }
    workbook.save(&input).unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["convert", "-o", "-"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "subgraph  \n0:Invalid task ID --> A:Design\nA:Design --> C:Draft\nA:Design --> D:Review\nend\n",
        ));
}

#[test]
fn test_convert_to_stdout() {
    let (dir, input) = setup_table("tasks.csv", SIMPLE_TABLE);

    cmd()
        .current_dir(dir.path())
        .args(["convert", "-o", "-"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("A:Design --> C:Draft"))
        .stdout(predicate::str::contains("Wrote").not());

    assert!(!dir.path().join("task-graph.md").exists());
}

#[test]
fn test_convert_reads_stdin() {
    cmd()
        .args(["convert", "-", "-o", "-"])
        .write_stdin("ID,Title,PreTask\nA,Alpha,\n")
        .assert()
        .success()
        .stdout("```mermaid\ngraph TB\nsubgraph  \n0:Invalid task ID --> A:Alpha\nend\n```\n");
}

#[test]
fn test_convert_json_summary() {
    let (dir, input) = setup_table("tasks.csv", SIMPLE_TABLE);
    let target = dir.path().join("out").join("graph.md");

    let assert = cmd()
        .args(["convert", "--format", "json", "-o"])
        .arg(&target)
        .arg(&input)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["records"], 5);
    assert_eq!(json["edges"], 5);
    assert_eq!(json["branches"], 2);
    assert_eq!(json["unvisited"], 0);
    assert_eq!(json["issues"].as_array().unwrap().len(), 0);
    assert!(target.is_file());
}

#[test]
fn test_convert_missing_header_fails() {
    let (dir, input) = setup_table("tasks.csv", "ID,Name,PreTask\nA,Alpha,\n");

    cmd()
        .current_dir(dir.path())
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Header row 1 is missing required field(s): Title",
        ));
}

#[test]
fn test_convert_custom_fields_and_rows() {
    let (dir, input) = setup_table(
        "plan.tsv",
        "Sprint plan\nkey\tname\tafter\n1\tKickoff\t\n2\tFollow-up\t1\n",
    );

    cmd()
        .current_dir(dir.path())
        .args([
            "convert", "-o", "-", "--id", "Key", "--title", "Name", "--pre", "After", "-i",
            "--header-row", "2", "--data-row", "3",
        ])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("0:Invalid task ID --> 1:Kickoff\n1:Kickoff --> 2:Follow-up"));
}

#[test]
fn test_convert_rejects_bad_rows() {
    let (dir, input) = setup_table("tasks.csv", SIMPLE_TABLE);

    cmd()
        .current_dir(dir.path())
        .args(["convert", "--header-row", "2", "--data-row", "2"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must come after header row"));
}

#[test]
fn test_convert_warns_on_dangling_predecessor() {
    let (dir, input) = setup_table("tasks.csv", "ID,Title,PreTask\nX,Lost,Z\n");

    cmd()
        .current_dir(dir.path())
        .args(["convert", "-o", "-"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("0:Invalid task ID --> X:Lost"))
        .stdout(predicate::str::contains("subgraph").not())
        .stderr(predicate::str::contains(
            "Warning: Task X has unknown predecessor Z",
        ));
}

#[test]
fn test_convert_strict_rejects_issues() {
    let (dir, input) = setup_table("tasks.csv", "ID,Title,PreTask\nA,One,\nA,Two,\n");

    cmd()
        .current_dir(dir.path())
        .args(["convert", "--strict"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input rejected: 1 structural issue(s) found"));

    assert!(!dir.path().join("task-graph.md").exists());
}

#[test]
fn test_convert_warns_on_unreachable_cycle() {
    let (dir, input) = setup_table("tasks.csv", "ID,Title,PreTask\nA,Alpha,\nP,P,Q\nQ,Q,P\n");

    cmd()
        .current_dir(dir.path())
        .args(["convert", "-o", "-"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Predecessor cycle among tasks: P, Q"))
        .stderr(predicate::str::contains("2 record(s) are not reachable"));
}

#[test]
fn test_convert_verbose_echoes_lines() {
    let (dir, input) = setup_table("tasks.csv", SIMPLE_TABLE);

    cmd()
        .current_dir(dir.path())
        .args(["--verbose", "convert"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose:render] A:Design --> C:Draft"));
}

#[test]
fn test_convert_jsonl_input() {
    let (dir, input) = setup_table(
        "tasks.jsonl",
        "{\"id\": \"A\", \"title\": \"Alpha\"}\n{\"id\": \"B\", \"title\": \"Beta\", \"pre\": \"A\"}\n",
    );

    cmd()
        .current_dir(dir.path())
        .args(["convert", "-o", "-", "--direction", "LR"])
        .arg(&input)
        .assert()
        .success()
        .stdout("```mermaid\ngraph LR\nsubgraph  \n0:Invalid task ID --> A:Alpha\nA:Alpha --> B:Beta\nend\n```\n");
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_init_writes_config() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let config = fs::read_to_string(dir.path().join("task-mermaid.toml")).unwrap();
    assert!(config.contains("id_field = \"ID\""));
    assert!(config.contains("direction = \"TB\""));

    // Second init refuses to overwrite
    cmd().arg("init").arg(dir.path()).assert().failure();
}

#[test]
fn test_project_config_is_discovered() {
    let (dir, _) = setup_table("tasks.csv", "Key;Name;After\nA;Alpha;\n");
    fs::write(
        dir.path().join("task-mermaid.toml"),
        r#"
output = "docs/graph.md"

[source]
id_field = "Key"
title_field = "Name"
pre_field = "After"
delimiter = ";"

[diagram]
root_title = "Start"
"#,
    )
    .unwrap();

    let sub = dir.path().join("nested");
    fs::create_dir_all(&sub).unwrap();

    cmd()
        .current_dir(&sub)
        .args(["convert", "../tasks.csv"])
        .assert()
        .success();

    let doc = fs::read_to_string(dir.path().join("docs").join("graph.md")).unwrap();
    assert!(doc.contains("0:Start --> A:Alpha"));
}

#[test]
fn test_explicit_config_flag() {
    let (dir, input) = setup_table("tasks.csv", SIMPLE_TABLE);
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[diagram]\ndirection = \"BT\"\n").unwrap();

    cmd()
        .args(["--config"])
        .arg(&config)
        .args(["convert", "-o", "-"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("```mermaid\ngraph BT\n"));
}

// =============================================================================
// Check Tests
// =============================================================================

#[test]
fn test_check_clean_input() {
    let (_dir, input) = setup_table("tasks.csv", SIMPLE_TABLE);

    cmd()
        .arg("check")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found in 5 records."));
}

#[test]
fn test_check_reports_issues() {
    let (_dir, input) = setup_table(
        "tasks.csv",
        "ID,Title,PreTask\nA,One,\nA,Two,\nX,Lost,Z\nS,Self,S\n",
    );

    cmd()
        .arg("check")
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Issues (3):"))
        .stdout(predicate::str::contains("Duplicate task ID A (2 records)"))
        .stdout(predicate::str::contains("Task S is its own predecessor"))
        .stdout(predicate::str::contains("Task X has unknown predecessor Z"));
}

#[test]
fn test_check_json() {
    let (_dir, input) = setup_table("tasks.csv", "ID,Title,PreTask\nX,Lost,Z\n");

    let assert = cmd()
        .args(["check", "--format", "json"])
        .arg(&input)
        .assert()
        .failure();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["records"], 1);
    assert_eq!(json["issues"][0]["kind"], "dangling_predecessor");
    assert_eq!(json["issues"][0]["pre"], "Z");
}
