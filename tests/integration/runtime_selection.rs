//! Integration tests for runtime selection and wrapped viewer commands

use super::test_utils::{native_config, write_track};
use igver::runtime::{EnvironmentSignals, RuntimeEnvironment, RuntimeKind, RuntimeMode};
use igver::screenshot::{ScreenshotRequest, ScreenshotService};
use std::ffi::OsString;
use std::path::PathBuf;
use tempfile::TempDir;

fn plan_with(mode: RuntimeMode, signals: EnvironmentSignals) -> (TempDir, igver::screenshot::RunPlan) {
    let dir = TempDir::new().unwrap();
    let root = dunce::canonicalize(dir.path()).unwrap();
    let data = root.join("data");
    std::fs::create_dir_all(&data).unwrap();
    let track = write_track(&data, "t.bam");

    let mut config = native_config();
    config.runtime.mode = mode;
    config.runtime.extra_binds = vec![PathBuf::from("/home")];
    let plan = ScreenshotService::new(config, signals)
        .plan(&ScreenshotRequest {
            tracks: vec![track],
            regions: vec!["chr1:1-10".to_string()],
            output_dir: root.join("out"),
            ..Default::default()
        })
        .unwrap();
    (dir, plan)
}

#[test]
fn auto_prefers_singularity_over_docker() {
    let signals = EnvironmentSignals {
        singularity_on_path: true,
        docker_on_path: true,
        ..Default::default()
    };
    let (_dir, plan) = plan_with(RuntimeMode::Auto, signals);
    assert_eq!(plan.runtime.kind(), RuntimeKind::Singularity);
    assert!(plan.command.starts_with("singularity run -B /home -B "));
    assert!(plan.command.contains(" docker://sahuno/igver:latest "));
}

#[test]
fn sandboxed_host_runs_natively() {
    let signals = EnvironmentSignals {
        docker_marker: true,
        singularity_on_path: true,
        ..Default::default()
    };
    let (_dir, plan) = plan_with(RuntimeMode::Auto, signals);
    assert_eq!(plan.runtime, RuntimeEnvironment::Native);
    assert!(plan.command.starts_with("/opt/IGV_2.19.5/igv.sh -b "));
}

#[test]
fn docker_mounts_every_input_directory_at_the_same_path() {
    let (dir, plan) = plan_with(RuntimeMode::Docker, EnvironmentSignals::default());
    let root = dunce::canonicalize(dir.path()).unwrap();
    match &plan.runtime {
        RuntimeEnvironment::Docker { image, volumes } => {
            assert_eq!(image, "sahuno/igver:latest");
            assert_eq!(
                volumes,
                &vec![PathBuf::from("/home"), root.join("data"), root.join("out")]
            );
        }
        other => panic!("unexpected runtime: {other:?}"),
    }
    let data = root.join("data").to_string_lossy().to_string();
    assert!(plan.command.contains(&format!("-v {}:{}", data, data)));
}

#[test]
fn force_native_wins_over_explicit_mode() {
    let signals = EnvironmentSignals {
        force_native: true,
        ..Default::default()
    };
    let (_dir, plan) = plan_with(RuntimeMode::Singularity, signals);
    assert_eq!(plan.runtime.kind(), RuntimeKind::Native);
}

#[test]
fn hostile_paths_stay_single_arguments() {
    use igver::runtime::{Launcher, ViewerConfig};

    let launcher = Launcher::new(RuntimeEnvironment::Native, ViewerConfig::default());
    let batch = PathBuf::from("/tmp/out dir/igver-x; rm -rf ~.batch");
    let command = launcher.command_for(&batch);
    assert_eq!(command.program, OsString::from("xvfb-run"));
    assert!(command.args.contains(&OsString::from(batch.as_os_str())));
}
