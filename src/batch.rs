//! Batch script model and compiler for the viewer's batch mode.

pub mod command;
pub mod compiler;

pub use command::{BatchCommand, BatchDocument, OverlapDisplay};
pub use compiler::{compile, RenderJob, RenderOptions};
