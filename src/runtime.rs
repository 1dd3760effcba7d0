//! Runtime selection and viewer command construction.

pub mod command;
pub mod mounts;
pub mod select;
pub mod signals;

pub use command::{Launcher, ViewerConfig, WrappedCommand};
pub use mounts::MountSet;
pub use select::{
    select_runtime, RuntimeConfig, RuntimeEnvironment, RuntimeKind, RuntimeMode,
    RuntimeSelector, DEFAULT_IMAGE,
};
pub use signals::EnvironmentSignals;
