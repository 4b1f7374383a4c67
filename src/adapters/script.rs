//! Runs the overlay and container helper scripts as child processes.

use crate::config::profile::ProfileConfig;
use crate::domain::model::{Invocation, Operation};
use crate::domain::ports::Collaborator;
use crate::utils::error::{ProvisionError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Executes each invocation with the matching helper script.
///
/// All three standard streams are inherited, so a helper can prompt on the
/// terminal and whatever it prints (including its failure diagnostics) goes
/// straight to the console.
#[derive(Debug, Clone)]
pub struct ScriptCollaborator {
    overlay_script: PathBuf,
    container_script: PathBuf,
}

impl ScriptCollaborator {
    pub fn new(overlay_script: PathBuf, container_script: PathBuf) -> Self {
        Self {
            overlay_script,
            container_script,
        }
    }

    pub fn from_profile(profile: &ProfileConfig) -> Self {
        Self::new(profile.overlay_script(), profile.container_script())
    }

    pub fn script_for(&self, operation: Operation) -> &PathBuf {
        match operation {
            Operation::CreateOverlay => &self.overlay_script,
            Operation::CreateContainer => &self.container_script,
        }
    }
}

#[async_trait]
impl Collaborator for ScriptCollaborator {
    #[instrument(skip(self), fields(operation = invocation.operation.as_str()))]
    async fn invoke(&self, invocation: &Invocation) -> Result<()> {
        let script = self.script_for(invocation.operation);
        let program = script.display().to_string();

        let status = Command::new(script)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| ProvisionError::SpawnError {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ProvisionError::CollaboratorFailure {
                program,
                args: invocation.args.clone(),
                code: status.code(),
            });
        }

        debug!("{} finished", program);
        Ok(())
    }
}
