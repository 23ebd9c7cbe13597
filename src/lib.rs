pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpClient;
pub use config::{Overrides, TargetConfig};
pub use core::commands::{Context, ServiceCommand};
pub use core::dispatch::CommandTable;
pub use utils::error::{CraneError, Result};
