//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override earlier ones key by key: defaults, global file, explicit
/// file, environment.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("viewer.igv_dir", "/opt/IGV_2.19.5")?
        .set_default("viewer.launcher", "igv.sh")?
        .set_default("viewer.max_iterations", 2)?
        .set_default("runtime.mode", "auto")?
        .set_default("runtime.image", crate::runtime::DEFAULT_IMAGE)?
        .set_default("render.genome", "hg19")?
        .set_default("render.overlap_display", "squish")?
        .set_default("render.max_panel_height", 200)?
        .set_default("render.format", "png")?
        .set_default("render.dpi", 300)?
        .set_default("convert.program", "rsvg-convert")
}
