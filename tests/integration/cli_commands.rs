#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::TempDir;

const TRIANGLE: &str = "3\n1 2 1\n2 3 1\n1 3 1\n";

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write input");
    path
}

fn color_to_file(input: &Path, output: &Path, extra: &[&str]) {
    cargo_bin_cmd!("edgecolor")
        .args(["--quiet", "color"])
        .arg(input)
        .arg("-o")
        .arg(output)
        .args(extra)
        .assert()
        .success();
}

#[test]
fn color_prints_text_triples_to_stdout() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "triangle.txt", TRIANGLE);
    let output = cargo_bin_cmd!("edgecolor")
        .arg("color")
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Edge 1: (1, 2), Color: 1",
            "Edge 2: (2, 3), Color: 2",
            "Edge 3: (1, 3), Color: 3",
        ]
    );
}

#[test]
fn colored_output_verifies() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "triangle.txt", TRIANGLE);
    let output = dir.path().join("colors.txt");
    color_to_file(&input, &output, &[]);

    let stdout = cargo_bin_cmd!("edgecolor")
        .args(["--format", "json", "verify"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&stdout).expect("valid json");
    assert_eq!(json["success"], Value::Bool(true));
    assert_eq!(json["counts"]["edges"], 3);
    assert_eq!(json["counts"]["colors_used"], 3);
}

#[test]
fn tampered_output_exits_with_two() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "triangle.txt", TRIANGLE);
    let output = write_input(
        &dir,
        "colors.txt",
        "Edge 1: (1, 2), Color: 1\nEdge 2: (2, 3), Color: 1\nEdge 3: (1, 3), Color: 3\n",
    );
    cargo_bin_cmd!("edgecolor")
        .args(["--quiet", "verify"])
        .arg(&input)
        .arg(&output)
        .assert()
        .code(2);
}

#[test]
fn csv_round_trip_through_verify() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "edges.csv", "id,x,y,m\n10,1,2,1\n11,1,3,2\n12,1,4,1\n");
    let output = dir.path().join("colors.csv");
    color_to_file(
        &input,
        &output,
        &["--input-format", "csv", "--output-format", "csv"],
    );
    let written = fs::read_to_string(&output).expect("read output");
    assert!(written.starts_with("id,x,y,m,color\n"));
    assert!(written.contains("11,1,3,2,2"));

    cargo_bin_cmd!("edgecolor")
        .args(["verify", "--input-format", "csv", "--output-format", "csv"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();
}

#[test]
fn stats_emits_json() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "multi.txt", "1 2 1\n1 2 3\n2 3 1\n");
    let stdout = cargo_bin_cmd!("edgecolor")
        .args(["--format", "json", "stats"])
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&stdout).expect("valid json");
    assert_eq!(json["edges"], 3);
    assert_eq!(json["vertices"], 3);
    assert_eq!(json["max_degree"], 3);
    assert_eq!(json["parallel_edges"], 1);
    assert_eq!(json["total_multiplicity"], 5);
}

#[test]
fn config_file_sets_output_format() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "triangle.txt", TRIANGLE);
    let config = write_input(&dir, "config.toml", "output_format = \"json\"\n");
    let stdout = cargo_bin_cmd!("edgecolor")
        .arg("--config")
        .arg(&config)
        .arg("color")
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&stdout).expect("valid json");
    let edges = json.as_array().expect("array of edges");
    assert_eq!(edges.len(), 3);
    assert_eq!(edges[2]["id"], 3);
    assert_eq!(edges[2]["color"], 3);
}

#[test]
fn unknown_config_keys_are_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "triangle.txt", TRIANGLE);
    let config = write_input(&dir, "config.toml", "colour = 3\n");
    cargo_bin_cmd!("edgecolor")
        .arg("--config")
        .arg(&config)
        .arg("stats")
        .arg(&input)
        .assert()
        .code(1);
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().expect("tempdir");
    let assert = cargo_bin_cmd!("edgecolor")
        .arg("color")
        .arg(dir.path().join("absent.txt"))
        .assert()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("not found"), "stderr: {stderr}");
}

#[test]
fn self_loops_are_reported_as_errors() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "loop.txt", "1 1 1\n");
    cargo_bin_cmd!("edgecolor")
        .arg("color")
        .arg(&input)
        .assert()
        .code(1);
}
