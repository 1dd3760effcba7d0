//! CLI presentation: text and json formatters per command family.

mod inspect;
mod jobs;
mod screenshot;
mod shared;

pub use inspect::{
    format_genomes_json, format_genomes_text, format_runtime_json, format_runtime_text,
    format_validation_json, format_validation_text,
};
pub use jobs::{format_jobs_summary_json, format_jobs_summary_text};
pub use screenshot::{format_plan_json, format_plan_text, format_report_json, format_report_text};
pub use shared::format_section_heading;
