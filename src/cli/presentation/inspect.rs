//! Validate, genomes and runtime presentation.

use super::shared::{format_section_heading, new_table, to_json};
use crate::genome::GenomeEntry;
use crate::region::RegionValidation;
use crate::runtime::{EnvironmentSignals, RuntimeKind};
use serde_json::json;

pub fn format_validation_text(results: &[RegionValidation]) -> String {
    let invalid = results.iter().filter(|r| !r.valid).count();
    let mut table = new_table(vec!["Region", "Status", "Reason"]);
    for result in results {
        let status = if result.valid { "✓" } else { "✗" };
        table.add_row(vec![result.region.clone(), status.to_string(), result.reason.clone()]);
    }
    let mut out = format!("{}\n\n{}\n\n", format_section_heading("Region validation"), table);
    if invalid == 0 {
        out.push_str(&format!("All {} region(s) valid", results.len()));
    } else {
        out.push_str(&format!("{} of {} region(s) invalid", invalid, results.len()));
    }
    out
}

pub fn format_validation_json(results: &[RegionValidation]) -> String {
    let invalid = results.iter().filter(|r| !r.valid).count();
    to_json(&json!({
        "results": results,
        "total": results.len(),
        "invalid": invalid,
    }))
}

pub fn format_genomes_text(entries: &[GenomeEntry]) -> String {
    let mut table = new_table(vec!["Genome", "Aliases"]);
    for entry in entries {
        table.add_row(vec![entry.canonical.clone(), entry.aliases.join(", ")]);
    }
    format!("{}\n\n{}", format_section_heading("Genomes"), table)
}

pub fn format_genomes_json(entries: &[GenomeEntry]) -> String {
    to_json(&json!({ "genomes": entries, "total": entries.len() }))
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

pub fn format_runtime_text(signals: &EnvironmentSignals, selected: RuntimeKind, image: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Environment")));
    let mut table = new_table(vec!["Signal", "Value"]);
    table.add_row(vec!["Forced native", yes_no(signals.force_native)]);
    table.add_row(vec!["/.dockerenv", yes_no(signals.docker_marker)]);
    table.add_row(vec!["Singularity container env", yes_no(signals.singularity_env)]);
    table.add_row(vec![
        "cgroup hint",
        signals.cgroup_hint.as_deref().unwrap_or("-"),
    ]);
    table.add_row(vec!["singularity on PATH", yes_no(signals.singularity_on_path)]);
    table.add_row(vec!["docker on PATH", yes_no(signals.docker_on_path)]);
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("{}\n\n", format_section_heading("Selected runtime")));
    out.push_str(&format!("  Runtime: {}", selected));
    if selected != RuntimeKind::Native {
        out.push_str(&format!("\n  Image: {}", image));
    }
    out
}

pub fn format_runtime_json(signals: &EnvironmentSignals, selected: RuntimeKind, image: &str) -> String {
    to_json(&json!({
        "signals": signals,
        "selected": selected,
        "image": image,
    }))
}
