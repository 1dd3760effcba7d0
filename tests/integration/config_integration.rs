//! Integration tests for Configuration System

use super::test_utils::with_xdg_env;
use igver::config::{global_config_path, ConfigLoader};
use igver::error::IgverError;
use igver::runtime::RuntimeMode;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_global_file_is_found_under_xdg_config_home() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let path = global_config_path().unwrap();
        assert_eq!(path, temp_dir.path().join("config/igver/config.toml"));

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"
[viewer]
igv_dir = "/opt/igv"
max_iterations = 3

[runtime]
mode = "singularity"
extra_binds = ["/data", "/scratch"]
"#,
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_environment(HashMap::new())
            .build()
            .unwrap();
        assert_eq!(config.viewer.igv_dir, PathBuf::from("/opt/igv"));
        assert_eq!(config.viewer.max_iterations, 3);
        assert_eq!(config.runtime.mode, RuntimeMode::Singularity);
        assert_eq!(
            config.runtime.extra_binds,
            vec![PathBuf::from("/data"), PathBuf::from("/scratch")]
        );
    });
}

#[test]
fn test_explicit_file_layers_over_global_file() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let global = global_config_path().unwrap();
        std::fs::create_dir_all(global.parent().unwrap()).unwrap();
        std::fs::write(&global, "[render]\ngenome = \"hg38\"\ndpi = 150\n").unwrap();

        let explicit = temp_dir.path().join("run.toml");
        std::fs::write(&explicit, "[render]\ndpi = 600\n\n[logging]\nlevel = \"debug\"\n").unwrap();

        let config = ConfigLoader::new()
            .with_file(&explicit)
            .with_environment(HashMap::new())
            .build()
            .unwrap();
        assert_eq!(config.render.genome, "hg38", "global value survives");
        assert_eq!(config.render.dpi, 600, "explicit file wins");
        assert_eq!(config.logging.level, "debug");
    });
}

#[test]
fn test_environment_list_and_image_override() {
    let mut vars = HashMap::new();
    vars.insert(
        "IGVER__RUNTIME__EXTRA_BINDS".to_string(),
        "/a,/b".to_string(),
    );
    vars.insert("IGVER__RENDER__FORMAT".to_string(), "svg".to_string());
    vars.insert("IGVER_IMAGE".to_string(), "docker://example/igv:2".to_string());

    let config = ConfigLoader::new()
        .with_global_path(None)
        .with_environment(vars)
        .build()
        .unwrap();
    assert_eq!(
        config.runtime.extra_binds,
        vec![PathBuf::from("/a"), PathBuf::from("/b")]
    );
    assert_eq!(config.render.format, "svg");
    assert_eq!(config.runtime.image, "docker://example/igv:2");
}

#[test]
fn test_unknown_format_is_rejected_at_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "[render]\nformat = \"jpeg\"\n").unwrap();
    let err = ConfigLoader::new()
        .with_global_path(None)
        .with_environment(HashMap::new())
        .with_file(&path)
        .build()
        .unwrap_err();
    assert!(matches!(err, IgverError::InvalidConfiguration(_)));
    assert!(err.to_string().contains("jpeg"));
}
