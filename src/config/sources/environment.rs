//! Environment source: `IGVER__<SECTION>__<KEY>` variables.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;
use std::collections::HashMap;

pub const PREFIX: &str = "IGVER";
pub const SEPARATOR: &str = "__";

/// Add the environment source. `vars` replaces the process environment when given.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: Option<HashMap<String, String>>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let source = Environment::with_prefix(PREFIX)
        .prefix_separator(SEPARATOR)
        .separator(SEPARATOR)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("runtime.extra_binds")
        .source(vars);
    Ok(builder.add_source(source))
}
