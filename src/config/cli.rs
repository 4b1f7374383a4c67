use crate::config::profile::{self, ProfileConfig};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "multienv")]
#[command(about = "Create overlay networks and branch containers for a multi-environment playground")]
pub struct CliConfig {
    /// Built-in profile to run
    #[arg(long, default_value = profile::PLAYGROUND)]
    pub profile: String,

    /// TOML profile file; used instead of a built-in profile
    #[arg(short, long, conflicts_with = "profile")]
    pub config: Option<String>,

    /// Directory holding create_overlay.sh and create_container.sh
    #[arg(long)]
    pub scripts_dir: Option<String>,

    /// Print the invocation plan without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log process resource usage after every phase
    #[arg(long)]
    pub monitor: bool,

    /// Identifier attached to logs and the run report
    #[arg(long)]
    pub execution_id: Option<String>,

    /// Write a JSON run report to this file after a successful run
    #[arg(long)]
    pub report: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Resolves the profile this invocation runs, with command-line overrides applied.
    pub fn load_profile(&self) -> Result<ProfileConfig> {
        let profile = match &self.config {
            Some(path) => ProfileConfig::from_file(path)?,
            None => ProfileConfig::builtin(&self.profile)?,
        };

        Ok(match &self.scripts_dir {
            Some(dir) => profile.with_scripts_dir(dir),
            None => profile,
        })
    }

    pub fn execution_id(&self) -> String {
        self.execution_id
            .clone()
            .unwrap_or_else(|| format!("run_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S")))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        if let Some(dir) = &self.scripts_dir {
            validation::validate_path("scripts_dir", dir)?;
        }
        if let Some(path) = &self.report {
            validation::validate_path("report", path)?;
        }
        if let Some(id) = &self.execution_id {
            validation::validate_non_empty_string("execution_id", id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ContainerContract;

    #[test]
    fn test_no_arguments_selects_playground() {
        let config = CliConfig::parse_from(["multienv"]);
        let profile = config.load_profile().unwrap();
        assert_eq!(profile.name(), "playground");
        assert_eq!(profile.scripts.directory, "/vagrant/networking_playground");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scripts_dir_override() {
        let config =
            CliConfig::parse_from(["multienv", "--profile", "replier", "--scripts-dir", "/tmp/s"]);
        let profile = config.load_profile().unwrap();
        assert_eq!(profile.scripts.directory, "/tmp/s");
        assert_eq!(profile.container_contract(), ContainerContract::LabelOnly);
    }

    #[test]
    fn test_explicit_execution_id_is_kept() {
        let config = CliConfig::parse_from(["multienv", "--execution-id", "nightly"]);
        assert_eq!(config.execution_id(), "nightly");

        let generated = CliConfig::parse_from(["multienv"]).execution_id();
        assert!(generated.starts_with("run_"));
    }

    #[test]
    fn test_config_file_and_profile_are_mutually_exclusive() {
        let mixed = CliConfig::try_parse_from([
            "multienv",
            "--profile",
            "replier",
            "--config",
            "configs/playground.toml",
        ]);
        assert!(mixed.is_err());

        let config_only =
            CliConfig::try_parse_from(["multienv", "--config", "configs/playground.toml"]);
        assert!(config_only.is_ok());
    }

    #[test]
    fn test_empty_report_path_is_rejected() {
        let config = CliConfig::parse_from(["multienv", "--report", ""]);
        assert!(config.validate().is_err());
    }
}
