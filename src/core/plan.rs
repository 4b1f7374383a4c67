use crate::config::profile::ProfileConfig;
use crate::domain::model::{BranchSet, Invocation, Operation, Phase, Plan};
use crate::utils::error::Result;
use std::fmt::Write;

pub const COMPLETION_BANNER: &str = "Created!";

fn overlay_banner(index: usize, set: &BranchSet) -> String {
    if index == 0 {
        "Create Main Networks".to_string()
    } else {
        format!("Create Main Networks for {} containers", set.name)
    }
}

fn container_banner(set: &BranchSet) -> String {
    format!("Create {} containers", set.branches.join(" and "))
}

/// Lays out every helper call of a run, in the order they must happen.
///
/// Per branch set: one overlay per (branch, subnet) pair, then one container
/// per service and branch with the branches iterating fastest. The custom
/// overlay and its containers always come last.
pub fn build_plan(profile: &ProfileConfig) -> Result<Plan> {
    let contract = profile.container_contract();
    let mut phases = Vec::new();

    for (index, set) in profile.branch_sets.iter().enumerate() {
        phases.push(Phase {
            banner: overlay_banner(index, set),
            invocations: set
                .pairs()
                .map(|(branch, subnet)| Invocation::overlay(subnet, branch))
                .collect(),
        });

        let mut containers = Vec::with_capacity(profile.services.len() * set.branches.len());
        for service in &profile.services {
            for branch in &set.branches {
                containers.push(Invocation::container(service, branch, set.networked, contract));
            }
        }
        phases.push(Phase {
            banner: container_banner(set),
            invocations: containers,
        });
    }

    let custom = &profile.custom;
    phases.push(Phase {
        banner: "Create Custom overlay".to_string(),
        invocations: vec![Invocation::overlay(&custom.subnet, &custom.label)],
    });
    phases.push(Phase {
        banner: "Create custom containers".to_string(),
        invocations: profile
            .custom_services()?
            .iter()
            .map(|service| Invocation::container(service, &custom.label, true, contract))
            .collect(),
    });

    Ok(Plan { phases })
}

/// Text shown by a dry run: each banner followed by the exact
/// `<script> <args>` lines a real run would execute.
pub fn render_plan(plan: &Plan, profile: &ProfileConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🔍 Dry Run Plan ({} calls):", plan.total_invocations());

    for phase in &plan.phases {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", phase.banner);
        for invocation in &phase.invocations {
            let script = match invocation.operation {
                Operation::CreateOverlay => profile.overlay_script(),
                Operation::CreateContainer => profile.container_script(),
            };
            let _ = writeln!(out, "  {} {}", script.display(), invocation.args.join(" "));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", COMPLETION_BANNER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(plan: &Plan) -> Vec<Vec<String>> {
        plan.invocations().map(|i| i.args.clone()).collect()
    }

    #[test]
    fn test_playground_plan_totals() {
        let plan = build_plan(&ProfileConfig::playground()).unwrap();

        assert_eq!(plan.total_invocations(), 28);
        assert_eq!(plan.count(Operation::CreateOverlay), 5);
        assert_eq!(plan.count(Operation::CreateContainer), 23);

        let sizes: Vec<usize> = plan.phases.iter().map(|p| p.invocations.len()).collect();
        assert_eq!(sizes, vec![2, 10, 2, 10, 1, 3]);
    }

    #[test]
    fn test_playground_banners() {
        let plan = build_plan(&ProfileConfig::playground()).unwrap();
        let banners: Vec<&str> = plan.phases.iter().map(|p| p.banner.as_str()).collect();
        assert_eq!(
            banners,
            vec![
                "Create Main Networks",
                "Create master and integration containers",
                "Create Main Networks for nonet containers",
                "Create master-nonet and integration-nonet containers",
                "Create Custom overlay",
                "Create custom containers",
            ]
        );
    }

    #[test]
    fn test_overlays_follow_branch_index_order() {
        let plan = build_plan(&ProfileConfig::playground()).unwrap();
        let overlays: Vec<Vec<String>> = plan
            .invocations()
            .filter(|i| i.operation == Operation::CreateOverlay)
            .map(|i| i.args.clone())
            .collect();
        assert_eq!(
            overlays,
            vec![
                vec!["12.0.0.0/24", "master"],
                vec!["13.0.0.0/24", "integration"],
                vec!["14.0.0.0/24", "master-nonet"],
                vec!["15.0.0.0/24", "integration-nonet"],
                vec!["14.0.0.0/24", "custom"],
            ]
        );
    }

    #[test]
    fn test_containers_iterate_services_outer_branches_inner() {
        let plan = build_plan(&ProfileConfig::playground()).unwrap();
        let first_containers: Vec<Vec<String>> = plan.phases[1]
            .invocations
            .iter()
            .take(4)
            .map(|i| i.args.clone())
            .collect();
        assert_eq!(
            first_containers,
            vec![
                vec!["1111", "service1", "master", "true"],
                vec!["1111", "service1", "integration", "true"],
                vec!["2222", "service2", "master", "true"],
                vec!["2222", "service2", "integration", "true"],
            ]
        );

        let nonet = &plan.phases[3].invocations;
        assert!(nonet.iter().all(|i| i.args[3] == "false"));
        assert_eq!(nonet[9].args, vec!["5555", "service5", "integration-nonet", "false"]);
    }

    #[test]
    fn test_custom_phase_comes_last() {
        let plan = build_plan(&ProfileConfig::playground()).unwrap();
        let all = args(&plan);

        assert_eq!(all[24], vec!["14.0.0.0/24", "custom"]);
        assert_eq!(
            &all[25..],
            &[
                vec!["2222", "service2", "custom", "true"],
                vec!["3333", "service3", "custom", "true"],
                vec!["4444", "service4", "custom", "true"],
            ]
        );
    }

    #[test]
    fn test_replier_plan_uses_three_argument_containers() {
        let plan = build_plan(&ProfileConfig::replier()).unwrap();

        assert_eq!(plan.total_invocations(), 16);
        assert!(plan
            .invocations()
            .filter(|i| i.operation == Operation::CreateContainer)
            .all(|i| i.args.len() == 3));

        let all = args(&plan);
        assert_eq!(all[12], vec!["14.0.0.0/24", "custom"]);
        assert_eq!(all[15], vec!["4444", "service4", "custom"]);
    }

    #[test]
    fn test_rendered_plan_lists_every_call_in_order() {
        let profile = ProfileConfig::playground();
        let plan = build_plan(&profile).unwrap();
        let rendered = render_plan(&plan, &profile);

        let calls: Vec<&str> = rendered
            .lines()
            .filter(|line| line.starts_with("  "))
            .map(str::trim)
            .collect();
        assert_eq!(calls.len(), 28);

        let expected: Vec<String> = plan
            .invocations()
            .map(|i| {
                let script = match i.operation {
                    Operation::CreateOverlay => "create_overlay.sh",
                    Operation::CreateContainer => "create_container.sh",
                };
                format!("/vagrant/networking_playground/{} {}", script, i.args.join(" "))
            })
            .collect();
        assert_eq!(calls, expected);

        assert_eq!(
            calls[0],
            "/vagrant/networking_playground/create_overlay.sh 12.0.0.0/24 master"
        );
        assert_eq!(
            calls[27],
            "/vagrant/networking_playground/create_container.sh 4444 service4 custom true"
        );
    }

    #[test]
    fn test_rendered_plan_shows_banners_and_completion() {
        let profile = ProfileConfig::replier();
        let rendered = render_plan(&build_plan(&profile).unwrap(), &profile);

        assert!(rendered.starts_with("🔍 Dry Run Plan (16 calls):"));
        assert!(rendered.contains("\nCreate Main Networks\n"));
        assert!(rendered.contains("\nCreate Custom overlay\n"));
        assert!(rendered.trim_end().ends_with(COMPLETION_BANNER));
        assert!(!rendered.contains("nonet"));
    }
}
