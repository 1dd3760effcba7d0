//! Property-based tests for region parsing, output naming and batch compilation

use igver::batch::{compile, RenderJob, RenderOptions};
use igver::genome::GenomeAliases;
use igver::naming::{OutputFormat, OutputNaming};
use igver::region::{validate_region, RegionResolver, RegionToken};
use igver::tracks::TrackSet;
use proptest::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn chrom() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u8..=22).prop_map(|n| n.to_string()),
        Just("X".to_string()),
        Just("Y".to_string()),
        Just("M".to_string()),
    ]
}

fn locus() -> impl Strategy<Value = (String, u64, u64)> {
    (chrom(), 1u64..1_000_000, 1u64..1_000_000)
        .prop_map(|(c, start, len)| (format!("chr{}", c), start, start + len))
}

fn format() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Png),
        Just(OutputFormat::Svg),
        Just(OutputFormat::Pdf)
    ]
}

/// Strict validation and token parsing agree on every `chrN:start-end` string.
#[test]
fn test_validation_agrees_with_parsing() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(chrom(), 0u64..2_000, 0u64..2_000),
            |(c, start, end)| {
                let text = format!("chr{}:{}-{}", c, start, end);
                let strict = validate_region(&text, None).valid;
                let parsed = RegionToken::parse(&text).is_ok();
                prop_assert_eq!(strict, parsed);
                prop_assert_eq!(strict, start > 0 && end > start);
                Ok(())
            },
        )
        .unwrap();
}

/// Names are a single path component with no `:` or whitespace, whatever the tag
/// holds, and always end in the snapshot extension.
#[test]
fn test_output_names_are_file_safe() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec(locus(), 1..4),
                "[a-zA-Z0-9 \t/\\\\._-]{1,8}",
                format(),
            ),
            |(loci, tag, format)| {
                let line = loci
                    .iter()
                    .map(|(c, s, e)| format!("{}:{}-{}", c, s, e))
                    .collect::<Vec<_>>()
                    .join(" ");
                let report = RegionResolver::new()
                    .with_tag(Some(tag.clone()))
                    .resolve(&[line])
                    .unwrap();
                prop_assert_eq!(report.groups.len(), 1);
                prop_assert_eq!(report.groups[0].tokens().len(), loci.len());

                let naming = OutputNaming::new("/out", format);
                let name = naming.file_name(&report.groups[0]);
                prop_assert!(!name.contains(':'));
                prop_assert!(!name.contains('/'));
                prop_assert!(!name.contains('\\'));
                prop_assert!(!name.chars().any(char::is_whitespace));
                let group_path = naming.path(&report.groups[0]);
                prop_assert_eq!(
                    group_path.parent(),
                    Some(Path::new("/out"))
                );

                let safe_tag: String = tag
                    .chars()
                    .map(|c| if c == '/' || c == '\\' || c.is_whitespace() { '_' } else { c })
                    .collect();
                let suffix = format!(".{}.{}", safe_tag, format.snapshot_extension());
                prop_assert!(name.ends_with(&suffix));
                Ok(())
            },
        )
        .unwrap();
}

/// Distinct single-locus regions map to distinct outputs, and the compiled script
/// has one snapshot per output, in the same order.
#[test]
fn test_snapshots_align_with_outputs() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &prop::collection::vec(locus(), 1..12),
            |loci| {
                let unique: Vec<String> = loci
                    .iter()
                    .map(|(c, s, e)| format!("{}:{}-{}", c, s, e))
                    .collect::<HashSet<_>>()
                    .into_iter()
                    .collect();
                let report = RegionResolver::new().resolve(&unique).unwrap();
                let naming = OutputNaming::new("/out", OutputFormat::Png);
                let expected = naming.expected_outputs(&report.groups);
                let distinct: HashSet<&PathBuf> = expected.paths().iter().collect();
                prop_assert_eq!(distinct.len(), unique.len());

                let jobs: Vec<RenderJob> = report
                    .groups
                    .iter()
                    .cloned()
                    .zip(expected.paths().iter().cloned())
                    .map(|(group, output_path)| RenderJob { group, output_path })
                    .collect();
                let genome = GenomeAliases::builtin().resolve("hg19");
                let document = compile(
                    &TrackSet::new(vec![PathBuf::from("/data/t.bam")]),
                    &genome,
                    naming.output_dir(),
                    &jobs,
                    &RenderOptions::default(),
                );
                let text = document.render();
                prop_assert!(text.starts_with("new\n"));
                prop_assert!(text.ends_with("\nexit"));

                let snapshots: Vec<&str> = text
                    .lines()
                    .filter_map(|l| l.strip_prefix("snapshot "))
                    .collect();
                let names: Vec<String> = expected
                    .paths()
                    .iter()
                    .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
                    .collect();
                prop_assert_eq!(snapshots, names);
                Ok(())
            },
        )
        .unwrap();
}

fn write_region_inputs(
    dir: &Path,
    literal: &(String, u64, u64),
    legacy: &[(String, u64, u64)],
    event: &str,
    bed: &[((String, u64, u64), String)],
) -> Vec<String> {
    let legacy_path = dir.join("events.txt");
    let line = legacy
        .iter()
        .map(|(c, s, e)| format!("{}:{}-{}", c, s, e))
        .collect::<Vec<_>>()
        .join(" ");
    fs::write(&legacy_path, format!("# events\n{} {}\n", line, event)).unwrap();

    let bed_path = dir.join("regions.bed");
    let rows: String = bed
        .iter()
        .map(|((c, s, e), name)| format!("{}\t{}\t{}\t{}\n", c, s, e, name))
        .collect();
    fs::write(&bed_path, rows).unwrap();

    vec![
        format!("{}:{}-{}", literal.0, literal.1, literal.2),
        legacy_path.to_string_lossy().to_string(),
        bed_path.to_string_lossy().to_string(),
    ]
}

fn derive(descriptors: &[String], tag: &str, format: OutputFormat) -> (Vec<PathBuf>, String) {
    let report = RegionResolver::new()
        .with_tag(Some(tag.to_string()))
        .resolve(descriptors)
        .unwrap();
    let naming = OutputNaming::new("/out", format);
    let expected = naming.expected_outputs(&report.groups);
    let jobs: Vec<RenderJob> = report
        .groups
        .iter()
        .cloned()
        .zip(expected.paths().iter().cloned())
        .map(|(group, output_path)| RenderJob { group, output_path })
        .collect();
    let genome = GenomeAliases::builtin().resolve("hg38");
    let document = compile(
        &TrackSet::new(vec![PathBuf::from("/data/t.bam"), PathBuf::from("/data/n.bam")]),
        &genome,
        naming.output_dir(),
        &jobs,
        &RenderOptions::default(),
    );
    (expected.into_paths(), document.render())
}

/// Resolving, naming and compiling the same literal, legacy and BED inputs twice
/// yields identical output paths and identical batch text.
#[test]
fn test_resolve_and_compile_are_deterministic() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                locus(),
                prop::collection::vec(locus(), 1..3),
                "[a-z]{1,8}",
                prop::collection::vec((locus(), "[A-Za-z0-9 /]{0,6}"), 1..5),
                "[a-z0-9]{1,4}",
                format(),
            ),
            |(literal, legacy, event, bed, tag, format)| {
                let dir = TempDir::new().unwrap();
                let descriptors = write_region_inputs(dir.path(), &literal, &legacy, &event, &bed);

                let (paths1, text1) = derive(&descriptors, &tag, format);
                let (paths2, text2) = derive(&descriptors, &tag, format);

                prop_assert_eq!(paths1.len(), 2 + bed.len());
                prop_assert_eq!(&paths1, &paths2);
                prop_assert_eq!(&text1, &text2);
                prop_assert_eq!(text1.matches("\nsnapshot ").count(), paths1.len());
                Ok(())
            },
        )
        .unwrap();
}
