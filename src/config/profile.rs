use crate::domain::model::{BranchSet, ContainerContract, ServiceDescriptor};
use crate::utils::error::{ProvisionError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PLAYGROUND: &str = "playground";
pub const REPLIER: &str = "replier";
pub const CUSTOM_LABEL: &str = "custom";
pub const CUSTOM_SUBNET: &str = "14.0.0.0/24";

/// Everything one provisioning run needs: the helper scripts, the services,
/// the branch sets and the custom overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub profile: ProfileInfo,
    pub scripts: ScriptsConfig,
    pub services: Vec<ServiceDescriptor>,
    pub branch_sets: Vec<BranchSet>,
    pub custom: CustomConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptsConfig {
    pub directory: String,
    #[serde(default = "default_overlay_script")]
    pub overlay: String,
    #[serde(default = "default_container_script")]
    pub container: String,
    #[serde(default)]
    pub container_contract: ContainerContract,
}

fn default_overlay_script() -> String {
    "create_overlay.sh".to_string()
}

fn default_container_script() -> String {
    "create_container.sh".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomConfig {
    pub subnet: String,
    #[serde(default = "default_custom_label")]
    pub label: String,
    /// Service names, in deployment order. When absent every service except
    /// the first and the last one is deployed.
    pub services: Option<Vec<String>>,
}

fn default_custom_label() -> String {
    CUSTOM_LABEL.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_services() -> Vec<ServiceDescriptor> {
    vec![
        ServiceDescriptor::new("1111", "service1"),
        ServiceDescriptor::new("2222", "service2"),
        ServiceDescriptor::new("3333", "service3"),
        ServiceDescriptor::new("4444", "service4"),
        ServiceDescriptor::new("5555", "service5"),
    ]
}

fn branch_set(name: &str, branches: &[&str], subnets: &[&str], networked: bool) -> BranchSet {
    BranchSet {
        name: name.to_string(),
        branches: branches.iter().map(|b| b.to_string()).collect(),
        subnets: subnets.iter().map(|s| s.to_string()).collect(),
        networked,
    }
}

impl ProfileConfig {
    /// Overlay playground: networked and no-network lanes, four-argument
    /// container calls.
    pub fn playground() -> Self {
        Self {
            profile: ProfileInfo {
                name: PLAYGROUND.to_string(),
                description: Some("Networked and isolated branch lanes".to_string()),
            },
            scripts: ScriptsConfig {
                directory: "/vagrant/networking_playground".to_string(),
                overlay: default_overlay_script(),
                container: default_container_script(),
                container_contract: ContainerContract::WithReachability,
            },
            services: default_services(),
            branch_sets: vec![
                branch_set(
                    "main",
                    &["master", "integration"],
                    &["12.0.0.0/24", "13.0.0.0/24"],
                    true,
                ),
                branch_set(
                    "nonet",
                    &["master-nonet", "integration-nonet"],
                    &["14.0.0.0/24", "15.0.0.0/24"],
                    false,
                ),
            ],
            custom: CustomConfig {
                subnet: CUSTOM_SUBNET.to_string(),
                label: default_custom_label(),
                services: None,
            },
            monitoring: None,
        }
    }

    /// Replier lanes: networked branches only, three-argument container calls.
    pub fn replier() -> Self {
        Self {
            profile: ProfileInfo {
                name: REPLIER.to_string(),
                description: Some("Replier services on networked branch lanes".to_string()),
            },
            scripts: ScriptsConfig {
                directory: "/vagrant/replier".to_string(),
                overlay: default_overlay_script(),
                container: default_container_script(),
                container_contract: ContainerContract::LabelOnly,
            },
            services: default_services(),
            branch_sets: vec![branch_set(
                "main",
                &["master", "integration"],
                &["12.0.0.0/24", "13.0.0.0/24"],
                true,
            )],
            custom: CustomConfig {
                subnet: CUSTOM_SUBNET.to_string(),
                label: default_custom_label(),
                services: None,
            },
            monitoring: None,
        }
    }

    pub fn builtin(name: &str) -> Result<Self> {
        match name {
            PLAYGROUND => Ok(Self::playground()),
            REPLIER => Ok(Self::replier()),
            other => Err(ProvisionError::InvalidConfigValueError {
                field: "profile".to_string(),
                value: other.to_string(),
                reason: format!("Unknown profile. Built-in profiles: {}, {}", PLAYGROUND, REPLIER),
            }),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProvisionError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProvisionError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn with_scripts_dir(mut self, directory: &str) -> Self {
        self.scripts.directory = directory.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn container_contract(&self) -> ContainerContract {
        self.scripts.container_contract
    }

    pub fn overlay_script(&self) -> PathBuf {
        Path::new(&self.scripts.directory).join(&self.scripts.overlay)
    }

    pub fn container_script(&self) -> PathBuf {
        Path::new(&self.scripts.directory).join(&self.scripts.container)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    /// Services deployed on the custom overlay, in deployment order.
    pub fn custom_services(&self) -> Result<Vec<ServiceDescriptor>> {
        match &self.custom.services {
            Some(names) => names
                .iter()
                .map(|name| {
                    self.services
                        .iter()
                        .find(|service| &service.name == name)
                        .cloned()
                        .ok_or_else(|| ProvisionError::InvalidConfigValueError {
                            field: "custom.services".to_string(),
                            value: name.clone(),
                            reason: "Not one of the profile's services".to_string(),
                        })
                })
                .collect(),
            None if self.services.len() > 2 => {
                Ok(self.services[1..self.services.len() - 1].to_vec())
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("profile.name", &self.profile.name)?;
        validation::validate_path("scripts.directory", &self.scripts.directory)?;
        validation::validate_path("scripts.overlay", &self.scripts.overlay)?;
        validation::validate_path("scripts.container", &self.scripts.container)?;
        validation::validate_resolved("scripts.directory", &self.scripts.directory)?;
        validation::validate_resolved("scripts.overlay", &self.scripts.overlay)?;
        validation::validate_resolved("scripts.container", &self.scripts.container)?;

        if self.services.is_empty() {
            return Err(ProvisionError::MissingConfigError {
                field: "services".to_string(),
            });
        }
        for service in &self.services {
            validation::validate_non_empty_string("services.name", &service.name)?;
            validation::validate_port("services.port", &service.port)?;
        }

        for set in &self.branch_sets {
            validation::validate_non_empty_string("branch_sets.name", &set.name)?;
            validation::validate_paired_lengths(
                &format!("branch_sets.{}", set.name),
                set.branches.len(),
                set.subnets.len(),
            )?;
            for branch in &set.branches {
                validation::validate_non_empty_string("branch_sets.branches", branch)?;
            }
            for subnet in &set.subnets {
                validation::validate_cidr("branch_sets.subnets", subnet)?;
            }
        }

        validation::validate_cidr("custom.subnet", &self.custom.subnet)?;
        validation::validate_non_empty_string("custom.label", &self.custom.label)?;
        self.custom_services()?;

        Ok(())
    }
}

impl Validate for ProfileConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
