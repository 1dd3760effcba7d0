//! Integration tests for region resolution across literals, legacy files and BED files

use igver::error::RegionError;
use igver::naming::{OutputFormat, OutputNaming};
use igver::region::{DescriptorKind, RegionResolver};
use std::fs;
use tempfile::TempDir;

#[test]
fn mixed_descriptors_keep_input_order() {
    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join("sv.txt");
    fs::write(
        &legacy,
        "# structural variants\n8:32534767-32536767 19:11137898-11139898 translocation\n\nchr5:100-200\n",
    )
    .unwrap();
    let bed = dir.path().join("peaks.bed");
    fs::write(
        &bed,
        "track name=peaks\nchr2\t1000\t2000\tpeak1\nchr3\t0\t500\n",
    )
    .unwrap();

    let report = RegionResolver::new()
        .resolve(&[
            "chr1:10-20".to_string(),
            legacy.to_string_lossy().to_string(),
            bed.to_string_lossy().to_string(),
        ])
        .unwrap();

    let targets: Vec<String> = report.groups.iter().map(|g| g.goto_target()).collect();
    assert_eq!(
        targets,
        vec![
            "chr1:10-20",
            "8:32534767-32536767 19:11137898-11139898",
            "chr5:100-200",
            "chr2:1000-2000",
            "chr3:0-500",
        ]
    );
    let kinds: Vec<DescriptorKind> = report.sources.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DescriptorKind::Literal,
            DescriptorKind::LegacyFile,
            DescriptorKind::BedFile
        ]
    );
    assert_eq!(report.region_files, vec![legacy, bed]);
}

#[test]
fn translocation_line_names_one_output() {
    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join("sv.txt");
    fs::write(
        &legacy,
        "8:32534767-32536767 19:11137898-11139898 translocation\n",
    )
    .unwrap();

    let report = RegionResolver::new()
        .with_tag(Some("tumor".to_string()))
        .resolve(&[legacy.to_string_lossy()])
        .unwrap();
    assert_eq!(report.groups.len(), 1);
    let group = &report.groups[0];
    assert_eq!(group.tokens().len(), 2);
    assert_eq!(group.event_tag(), Some("translocation"));

    let naming = OutputNaming::new(dir.path(), OutputFormat::Png);
    assert_eq!(
        naming.file_name(group),
        "8-32534767-32536767.19-11137898-11139898.translocation.tumor.png"
    );
}

#[test]
fn malformed_lines_are_counted_not_fatal() {
    let dir = TempDir::new().unwrap();
    let bed = dir.path().join("regions.bed");
    fs::write(&bed, "chr1\t100\t200\nbroken-line\nchr1\t300\t400\n").unwrap();
    let report = RegionResolver::new()
        .resolve(&[bed.to_string_lossy()])
        .unwrap();
    assert_eq!(report.groups.len(), 2);
    assert_eq!(report.malformed_lines(), 1);
}

#[test]
fn missing_region_file_is_not_found() {
    let err = RegionResolver::new()
        .resolve(&["/no/such/regions.bed"])
        .unwrap_err();
    assert!(matches!(err, RegionError::NotFound { .. }));
}

#[test]
fn free_text_literal_is_invalid() {
    let err = RegionResolver::new().resolve(&["BRCA1"]).unwrap_err();
    assert!(matches!(err, RegionError::Invalid { .. }));
}

#[test]
fn multi_tag_line_reports_its_line_number() {
    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join("sv.txt");
    fs::write(&legacy, "chr1:1-10\nchr2:1-10 deletion somatic\n").unwrap();
    match RegionResolver::new()
        .resolve(&[legacy.to_string_lossy()])
        .unwrap_err()
    {
        RegionError::AmbiguousEventTag { line, tokens, .. } => {
            assert_eq!(line, 2);
            assert_eq!(tokens, vec!["deletion", "somatic"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}
