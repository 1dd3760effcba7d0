//! IGVer: Reproducible IGV Screenshots
//!
//! Turns region lists (literal coordinates, multi-locus text files, BED files) and
//! track files into IGV batch scripts, runs the viewer natively or inside a
//! container, and verifies that every expected snapshot was written.
//!
//! Library callers normally go through [`screenshot::ScreenshotService`]:
//!
//! ```no_run
//! use igver::config::ConfigLoader;
//! use igver::runtime::EnvironmentSignals;
//! use igver::screenshot::{ScreenshotRequest, ScreenshotService};
//!
//! # fn main() -> Result<(), igver::error::IgverError> {
//! let service = ScreenshotService::new(ConfigLoader::load()?, EnvironmentSignals::probe());
//! let report = service.run(&ScreenshotRequest {
//!     tracks: vec!["tumor.bam".into()],
//!     regions: vec!["chr1:1000000-2000000".into()],
//!     output_dir: "shots".into(),
//!     ..Default::default()
//! })?;
//! println!("{} screenshot(s)", report.outputs.len());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod genome;
pub mod jobs;
pub mod logging;
pub mod naming;
pub mod orchestrator;
pub mod paths;
pub mod region;
pub mod runtime;
pub mod screenshot;
pub mod tracks;
