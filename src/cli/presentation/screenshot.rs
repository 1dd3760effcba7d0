//! Shoot and plan presentation: run reports and dry-run plans.

use super::shared::{format_path_list, format_section_heading, new_table, to_json};
use crate::screenshot::{RunPlan, ScreenshotReport};
use serde_json::json;

pub fn format_report_text(report: &ScreenshotReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Screenshots")));
    if report.outputs.is_empty() {
        out.push_str("  No screenshots produced.\n");
    } else {
        out.push_str(&format_path_list(&report.outputs));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format!("  Regions: {}\n", report.groups));
    out.push_str(&format!("  Runtime: {}\n", report.runtime));
    if report.reused_existing {
        out.push_str("  Viewer runs: 0 (all snapshots already existed)\n");
    } else {
        out.push_str(&format!("  Viewer runs: {}\n", report.attempts));
    }
    if report.malformed_lines > 0 {
        out.push_str(&format!(
            "  Skipped malformed region lines: {}\n",
            report.malformed_lines
        ));
    }
    out.trim_end().to_string()
}

pub fn format_report_json(report: &ScreenshotReport) -> String {
    to_json(report)
}

pub fn format_plan_text(plan: &RunPlan) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Batch script")));
    out.push_str(&plan.batch);
    out.push_str("\n\n");

    out.push_str(&format!("{}\n\n", format_section_heading("Outputs")));
    let mut table = new_table(vec!["Region", "Output"]);
    for (job, output) in plan.jobs.iter().zip(plan.final_outputs()) {
        table.add_row(vec![job.group.goto_target(), output.display().to_string()]);
    }
    out.push_str(&format!("{}\n\n", table));

    if plan.sources.iter().any(|s| s.skipped > 0 || s.malformed > 0) {
        out.push_str(&format!("{}\n\n", format_section_heading("Region sources")));
        let mut table = new_table(vec!["Source", "Groups", "Skipped", "Malformed"]);
        for source in &plan.sources {
            table.add_row(vec![
                source.descriptor.clone(),
                source.groups.to_string(),
                source.skipped.to_string(),
                source.malformed.to_string(),
            ]);
        }
        out.push_str(&format!("{}\n\n", table));
    }

    out.push_str(&format!("{}\n\n", format_section_heading("Runtime")));
    out.push_str(&format!("  Kind: {}\n", plan.runtime.kind()));
    out.push_str(&format!("  Genome: {}\n", plan.genome));
    out.push_str(&format!("  Command: {}", plan.command));
    out
}

pub fn format_plan_json(plan: &RunPlan) -> String {
    let mut value = serde_json::to_value(plan).unwrap_or_else(|_| json!({}));
    value["final_outputs"] = json!(plan.final_outputs());
    to_json(&value)
}
