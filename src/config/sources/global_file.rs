//! Global config file source: $XDG_CONFIG_HOME/igver/config.toml (platform config dir
//! elsewhere).

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to the global config file, if a home directory can be determined.
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "igver").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add a config file source to builder if the file exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(path) = path else {
        return Ok(builder);
    };
    if path.is_file() {
        let canonical = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        debug!(config_path = %canonical.display(), "Loading global configuration");
        builder = builder.add_source(File::from(canonical).required(false));
    } else {
        debug!(config_path = %path.display(), "No global configuration file");
    }
    Ok(builder)
}
