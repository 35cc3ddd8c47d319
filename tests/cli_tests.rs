//! Integration tests for the slurm2json binary

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SHERLOCK: &str = "tests/fixtures/sherlock.conf";

fn write_conf(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_print_outputs_json_keyed_by_cluster() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("slurm2json");
    cmd.arg("--config").arg(SHERLOCK).arg("--print");

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["sherlock"]["nodes"]["sh-1"].is_object());
    assert_eq!(parsed["sherlock"]["partitions"]["owners"]["maxNodes"], 6);
    assert_eq!(parsed["sherlock"]["defaults"]["partitions"][0], "normal");
}

#[test]
fn test_print_does_not_write_outfile() {
    let dir = TempDir::new().unwrap();
    let outfile = dir.path().join("machines.json");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("slurm2json");
    cmd.arg("--config")
        .arg(SHERLOCK)
        .arg("--outfile")
        .arg(&outfile)
        .arg("--print");

    cmd.assert().success();
    assert!(!outfile.exists());
}

#[test]
fn test_writes_outfile() {
    let dir = TempDir::new().unwrap();
    let outfile = dir.path().join("machines.json");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("slurm2json");
    cmd.arg("--config").arg(SHERLOCK).arg("--outfile").arg(&outfile);

    cmd.assert().success().stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&outfile).unwrap();
    assert!(content.starts_with("{\n    \"sherlock\": {"));
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["sherlock"]["features"]["gpu"][0], "gpu");
}

#[test]
fn test_missing_config_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("slurm2json");
    cmd.arg("--config").arg("does-not-exist.conf").arg("--print");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Cannot find does-not-exist.conf"));
}

#[test]
fn test_existing_outfile_requires_force() {
    let dir = TempDir::new().unwrap();
    let outfile = write_conf(&dir, "machines.json", "{}");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("slurm2json");
    cmd.arg("--config").arg(SHERLOCK).arg("--outfile").arg(&outfile);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&outfile).unwrap(), "{}");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("slurm2json");
    cmd.arg("--config")
        .arg(SHERLOCK)
        .arg("--outfile")
        .arg(&outfile)
        .arg("--force");
    cmd.assert().success();
    assert!(fs::read_to_string(&outfile).unwrap().contains("sherlock"));
}

#[test]
fn test_update_merges_per_cluster() {
    let dir = TempDir::new().unwrap();
    let outfile = write_conf(
        &dir,
        "machines.json",
        r#"{"farmshare": {"nodes": {}}, "sherlock": {"stale": true}}"#,
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("slurm2json");
    cmd.arg("--config")
        .arg(SHERLOCK)
        .arg("--outfile")
        .arg(&outfile)
        .arg("--update");
    cmd.assert().success();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&outfile).unwrap()).unwrap();
    assert!(parsed["farmshare"].is_object());
    assert!(parsed["sherlock"].get("stale").is_none());
    assert!(parsed["sherlock"]["nodes"].is_object());
}

#[test]
fn test_exclude_partitions() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("slurm2json");
    cmd.arg("--config")
        .arg(SHERLOCK)
        .arg("--print")
        .arg("--exclude")
        .arg("owners,gpu");

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    let cluster = &parsed["sherlock"];

    assert!(cluster["partitions"].get("owners").is_none());
    assert!(cluster["partitions"].get("gpu").is_none());
    assert!(cluster["features"].get("owners").is_none());
    assert_eq!(cluster["nodes"]["sh-3"]["partitions"], serde_json::json!(["normal"]));
    assert_eq!(cluster["nodes"]["gpu-21"]["partitions"], serde_json::json!([]));
}

#[test]
fn test_multiple_configs() {
    let dir = TempDir::new().unwrap();
    let second = write_conf(
        &dir,
        "farmshare.conf",
        "ClusterName=farmshare\nNodeName=rice[1-2]\nPartitionName=normal Nodes=rice[1-2]\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("slurm2json");
    cmd.arg("--config")
        .arg(SHERLOCK)
        .arg("--config")
        .arg(&second)
        .arg("--print");

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert!(parsed["sherlock"].is_object());
    assert_eq!(parsed["farmshare"]["partitions"]["normal"]["maxNodes"], 2);
}

#[test]
fn test_parse_error_reports_file_and_line() {
    let dir = TempDir::new().unwrap();
    let conf = write_conf(&dir, "bad.conf", "ClusterName=c\nNodeName=n[9-1]\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("slurm2json");
    cmd.arg("--config").arg(&conf).arg("--print");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_skip_prefix_override() {
    let dir = TempDir::new().unwrap();
    let conf = write_conf(
        &dir,
        "c.conf",
        "ClusterName=c\nPartitionName=test Nodes=n1\nPartitionName=scratch Nodes=n2\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("slurm2json");
    cmd.arg("--config")
        .arg(&conf)
        .arg("--print")
        .arg("--skip-prefix")
        .arg("scratch");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"test\": {"))
        .stdout(predicate::str::contains("\"scratch\"").not());
}
