pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "replier")]
pub mod replier;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::ScriptCollaborator;
pub use config::profile::ProfileConfig;
pub use core::orchestrator::{Orchestrator, RunSummary};
pub use utils::error::{ProvisionError, Result};
