use clap::Parser;
use multienv::core::plan::{build_plan, render_plan};
use multienv::utils::{logger, validation::Validate};
use multienv::{CliConfig, Orchestrator, ProfileConfig, ScriptCollaborator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // Initialize logging
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting multienv");
    tracing::debug!("CLI config: {:?}", config);

    // Validate command-line arguments
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    // Load the built-in profile or the profile file, then apply overrides
    let profile = match config.load_profile() {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("❌ Failed to load profile: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    // Validate the profile before any helper runs
    if let Err(e) = profile.validate() {
        tracing::error!("❌ Profile validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    // Show profile summary
    let execution_id = config.execution_id();
    display_profile_summary(&profile, &config, &execution_id);

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No helper will be invoked");
        perform_dry_run(&profile)?;
        return Ok(());
    }

    // Either the flag or the profile can turn monitoring on
    let monitor_enabled = config.monitor || profile.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // Wire the helper scripts into the orchestrator and run
    let collaborator = ScriptCollaborator::from_profile(&profile);
    let orchestrator =
        Orchestrator::new_with_monitoring(collaborator, profile, execution_id, monitor_enabled);

    match orchestrator.run().await {
        Ok(summary) => {
            if let Some(path) = &config.report {
                summary.write_to(path)?;
                tracing::info!("📁 Run report saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Provisioning failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // The failing helper's exit code becomes ours
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_profile_summary(profile: &ProfileConfig, config: &CliConfig, execution_id: &str) {
    tracing::info!("📋 Profile: {}", profile.name());
    tracing::info!("  Execution: {}", execution_id);
    tracing::info!("  Scripts: {}", profile.scripts.directory);
    tracing::info!("  Container contract: {:?}", profile.container_contract());
    for set in &profile.branch_sets {
        tracing::info!(
            "  Branch set '{}': {} (networked: {})",
            set.name,
            set.branches.join(", "),
            set.networked
        );
    }
    tracing::info!(
        "  Custom overlay: {} on {}",
        profile.custom.label,
        profile.custom.subnet
    );
    if config.dry_run {
        tracing::info!("  🔍 DRY RUN MODE ENABLED");
    }
}

fn perform_dry_run(profile: &ProfileConfig) -> Result<(), Box<dyn std::error::Error>> {
    let plan = build_plan(profile)?;
    print!("{}", render_plan(&plan, profile));
    Ok(())
}
