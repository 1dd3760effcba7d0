//! CLI smoke tests against the built `igver` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary with HOME and XDG_CONFIG_HOME isolated under `dir`.
fn igver(dir: &Path, args: &[&str]) -> Output {
    let home = dir.join("home");
    let config_home = dir.join("config");
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&config_home).unwrap();
    Command::new(env!("CARGO_BIN_EXE_igver"))
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", &config_home)
        .env_remove("IGVER_LOG")
        .env_remove("IGVER_IMAGE")
        .arg("--quiet")
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_genomes_json_lists_builtin_aliases() {
    let temp_dir = TempDir::new().unwrap();
    let output = igver(temp_dir.path(), &["genomes", "--output-format", "json"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let hg38 = json["genomes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["canonical"] == "hg38")
        .unwrap();
    assert!(hg38["aliases"]
        .as_array()
        .unwrap()
        .iter()
        .any(|a| a == "GRCh38"));
}

#[test]
fn test_validate_reports_each_region() {
    let temp_dir = TempDir::new().unwrap();
    let output = igver(
        temp_dir.path(),
        &[
            "validate",
            "chr1:1000-2000",
            "chr1:2000-1000",
            "chr1:1-300000000",
            "-g",
            "hg19",
            "--output-format",
            "json",
        ],
    );
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["total"], 3);
    assert_eq!(json["invalid"], 2);
    assert!(json["results"][2]["reason"]
        .as_str()
        .unwrap()
        .contains("exceeds chromosome"));
}

#[test]
fn test_plan_prints_script_without_creating_output() {
    let temp_dir = TempDir::new().unwrap();
    let track = temp_dir.path().join("t.bam");
    fs::write(&track, b"").unwrap();
    let out = temp_dir.path().join("out");
    let output = igver(
        temp_dir.path(),
        &[
            "plan",
            "-i",
            track.to_str().unwrap(),
            "-r",
            "chr7:5-50",
            "-o",
            out.to_str().unwrap(),
            "--runtime",
            "native",
            "--output-format",
            "json",
        ],
    );
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(json["batch"].as_str().unwrap().contains("goto chr7:5-50"));
    assert_eq!(json["runtime"]["kind"], "native");
    assert!(!out.exists());
}

#[test]
fn test_missing_track_exits_nonzero_with_one_line() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.bam");
    let output = igver(
        temp_dir.path(),
        &[
            "shoot",
            "-i",
            missing.to_str().unwrap(),
            "-r",
            "chr1:1-10",
            "-o",
            temp_dir.path().join("out").to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("track not found"), "stderr={}", err);
    assert_eq!(err.trim().lines().count(), 1);
}

#[test]
fn test_bad_overlap_display_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let track = temp_dir.path().join("t.bam");
    fs::write(&track, b"").unwrap();
    let output = igver(
        temp_dir.path(),
        &[
            "plan",
            "-i",
            track.to_str().unwrap(),
            "-r",
            "chr1:1-10",
            "-d",
            "stacked",
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("stacked"));
}

#[test]
fn test_runtime_reports_forced_native() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");
    fs::create_dir_all(&home).unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_igver"))
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env("IGVER_IN_CONTAINER", "1")
        .args(["--quiet", "runtime", "--runtime", "docker", "--output-format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["signals"]["force_native"], true);
    assert_eq!(json["selected"], "native");
}
