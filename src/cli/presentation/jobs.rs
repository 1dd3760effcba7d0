//! Job file presentation.

use super::shared::{format_section_heading, new_table, to_json};
use crate::jobs::JobsSummary;

pub fn format_jobs_summary_text(summary: &JobsSummary) -> String {
    let mut table = new_table(vec!["Job", "Status", "Outputs", "Error"]);
    for result in &summary.results {
        table.add_row(vec![
            result.name.clone(),
            if result.success { "✓" } else { "✗" }.to_string(),
            result.outputs.len().to_string(),
            result.error.clone().unwrap_or_default(),
        ]);
    }
    format!(
        "{}\n\n{}\n\nTotal: {}  Successful: {}  Failed: {}",
        format_section_heading("Jobs"),
        table,
        summary.total,
        summary.successful,
        summary.failed
    )
}

pub fn format_jobs_summary_json(summary: &JobsSummary) -> String {
    to_json(summary)
}
