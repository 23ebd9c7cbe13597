#[cfg(feature = "cli")]
pub mod cli;
pub mod target;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use target::{Overrides, TargetConfig};
