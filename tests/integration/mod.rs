//! Integration tests for the IGVer screenshot engine

mod batch_compile;
mod cli_smoke;
mod config_integration;
mod region_resolution;
mod runtime_selection;
mod test_utils;
