use crate::config::profile::ProfileConfig;
use crate::core::plan::{build_plan, COMPLETION_BANNER};
use crate::domain::model::{Operation, Plan};
use crate::domain::ports::Collaborator;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// What a completed run did.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub execution_id: String,
    pub profile: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub overlays_created: usize,
    pub containers_created: usize,
    pub total_invocations: usize,
    pub phases: Vec<String>,
}

impl RunSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Runs a profile's plan against a collaborator, one call at a time.
pub struct Orchestrator<C: Collaborator> {
    collaborator: C,
    profile: ProfileConfig,
    execution_id: String,
    monitor: SystemMonitor,
}

impl<C: Collaborator> Orchestrator<C> {
    pub fn new(collaborator: C, profile: ProfileConfig, execution_id: String) -> Self {
        Self::new_with_monitoring(collaborator, profile, execution_id, false)
    }

    pub fn new_with_monitoring(
        collaborator: C,
        profile: ProfileConfig,
        execution_id: String,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            collaborator,
            profile,
            execution_id,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn plan(&self) -> Result<Plan> {
        build_plan(&self.profile)
    }

    /// Executes every phase in order. The first failing call ends the run;
    /// nothing already created is rolled back.
    pub async fn run(&self) -> Result<RunSummary> {
        let plan = self.plan()?;
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::info!(
            "🚀 Provisioning profile '{}' ({} calls, execution {})",
            self.profile.name(),
            plan.total_invocations(),
            self.execution_id
        );

        let mut overlays_created = 0;
        let mut containers_created = 0;

        for phase in &plan.phases {
            println!("{}", phase.banner);
            tracing::debug!("📦 {} ({} calls)", phase.banner, phase.invocations.len());

            for invocation in &phase.invocations {
                tracing::debug!("▶️ {}", invocation);
                if let Err(e) = self.collaborator.invoke(invocation).await {
                    tracing::error!("❌ {} failed: {}", invocation, e);
                    return Err(e);
                }
                match invocation.operation {
                    Operation::CreateOverlay => overlays_created += 1,
                    Operation::CreateContainer => containers_created += 1,
                }
            }

            self.monitor.log_stats(&phase.banner);
        }

        println!("{}", COMPLETION_BANNER);
        self.monitor.log_final_stats();

        let summary = RunSummary {
            execution_id: self.execution_id.clone(),
            profile: self.profile.name().to_string(),
            started_at,
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            overlays_created,
            containers_created,
            total_invocations: overlays_created + containers_created,
            phases: plan.phases.iter().map(|p| p.banner.clone()).collect(),
        };

        tracing::info!(
            "✅ Created {} overlays and {} containers in {}ms",
            summary.overlays_created,
            summary.containers_created,
            summary.duration_ms
        );

        Ok(summary)
    }
}
