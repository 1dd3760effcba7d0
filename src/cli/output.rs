//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::IgverError;

/// Map domain/service errors to a single line for CLI output.
pub fn map_error(e: &IgverError) -> String {
    format!("Error: {}", e)
}
