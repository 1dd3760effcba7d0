//! Integration tests for batch script compilation through the planning service

use super::test_utils::{native_config, write_track};
use igver::error::IgverError;
use igver::runtime::EnvironmentSignals;
use igver::screenshot::{ScreenshotRequest, ScreenshotService};
use std::fs;
use tempfile::TempDir;

#[test]
fn expand_mode_with_preferences_compiles_exact_script() {
    let dir = TempDir::new().unwrap();
    let root = dunce::canonicalize(dir.path()).unwrap();
    let tumor = write_track(&root, "tumor.bam");
    let normal = write_track(&root, "normal.bam");
    let prefs = root.join("prefs.batch");
    fs::write(&prefs, "preference SAM.SHOW_SOFT_CLIPPED true\n").unwrap();
    let out = root.join("shots");

    let mut config = native_config();
    config.render.genome = "GRCh38".to_string();
    config.render.overlap_display = "expand".to_string();
    config.render.max_panel_height = 300;
    config.render.preferences = Some(prefs);

    let plan = ScreenshotService::new(config, EnvironmentSignals::default())
        .plan(&ScreenshotRequest {
            tracks: vec![tumor.clone(), normal.clone()],
            regions: vec!["chr1:100-200 deletion".to_string()],
            output_dir: out.clone(),
            ..Default::default()
        })
        .unwrap();

    let expected = format!(
        "new\nsnapshotDirectory {}\ngenome hg38\nload {}\nload {}\ngoto chr1:100-200\nmaxPanelHeight 300\npreference SAM.SHOW_SOFT_CLIPPED true\nsnapshot chr1-100-200.deletion.png\nexit",
        out.display(),
        tumor.display(),
        normal.display()
    );
    assert_eq!(plan.batch, expected);
    assert_eq!(plan.expected.paths(), &[out.join("chr1-100-200.deletion.png")]);
}

#[test]
fn collapse_mode_emits_directive_per_region() {
    let dir = TempDir::new().unwrap();
    let track = write_track(dir.path(), "t.bam");
    let mut config = native_config();
    config.render.overlap_display = "collapse".to_string();

    let plan = ScreenshotService::new(config, EnvironmentSignals::default())
        .plan(&ScreenshotRequest {
            tracks: vec![track],
            regions: vec!["chr1:1-10".to_string(), "chr2:1-10".to_string()],
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(plan.batch.lines().filter(|l| *l == "collapse").count(), 2);
    assert_eq!(plan.document.snapshot_count(), 2);
}

#[test]
fn snapshot_commands_align_with_expected_outputs() {
    let dir = TempDir::new().unwrap();
    let track = write_track(dir.path(), "t.bam");
    let regions = dir.path().join("regions.bed");
    fs::write(&regions, "chr1\t10\t20\ta\nchr1\t30\t40\tb\nchr1\t50\t60\tc\n").unwrap();

    let plan = ScreenshotService::new(native_config(), EnvironmentSignals::default())
        .plan(&ScreenshotRequest {
            tracks: vec![track],
            regions: vec![regions.to_string_lossy().to_string()],
            output_dir: dir.path().to_path_buf(),
            tag: Some("v2".to_string()),
            ..Default::default()
        })
        .unwrap();

    let snapshot_names: Vec<&str> = plan
        .batch
        .lines()
        .filter_map(|l| l.strip_prefix("snapshot "))
        .collect();
    let expected_names: Vec<String> = plan
        .expected
        .paths()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(snapshot_names, expected_names);
    assert_eq!(
        snapshot_names,
        vec!["chr1-10-20.a.v2.png", "chr1-30-40.b.v2.png", "chr1-50-60.c.v2.png"]
    );
}

#[test]
fn missing_preferences_file_fails_planning() {
    let dir = TempDir::new().unwrap();
    let track = write_track(dir.path(), "t.bam");
    let mut config = native_config();
    config.render.preferences = Some(dir.path().join("absent.batch"));
    let err = ScreenshotService::new(config, EnvironmentSignals::default())
        .plan(&ScreenshotRequest {
            tracks: vec![track],
            regions: vec!["chr1:1-10".to_string()],
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, IgverError::InputNotFound { .. }));
}
