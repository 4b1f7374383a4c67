use serde::{Deserialize, Serialize};
use std::fmt;

/// A service deployed once per branch. The port is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub port: String,
    pub name: String,
}

impl ServiceDescriptor {
    pub fn new(port: &str, name: &str) -> Self {
        Self {
            port: port.to_string(),
            name: name.to_string(),
        }
    }
}

/// Branches paired by index with the subnets their overlays are created on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSet {
    pub name: String,
    pub branches: Vec<String>,
    pub subnets: Vec<String>,
    #[serde(default = "default_networked")]
    pub networked: bool,
}

fn default_networked() -> bool {
    true
}

impl BranchSet {
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.branches
            .iter()
            .zip(self.subnets.iter())
            .map(|(branch, subnet)| (branch.as_str(), subnet.as_str()))
    }
}

/// Argument shape expected by `create_container`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerContract {
    /// `port name label true|false`
    #[default]
    WithReachability,
    /// `port name label`
    LabelOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateOverlay,
    CreateContainer,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateOverlay => "create_overlay",
            Self::CreateContainer => "create_container",
        }
    }
}

/// One helper call, with its positional arguments in call order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub operation: Operation,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn overlay(subnet: &str, label: &str) -> Self {
        Self {
            operation: Operation::CreateOverlay,
            args: vec![subnet.to_string(), label.to_string()],
        }
    }

    pub fn container(
        service: &ServiceDescriptor,
        label: &str,
        networked: bool,
        contract: ContainerContract,
    ) -> Self {
        let mut args = vec![service.port.clone(), service.name.clone(), label.to_string()];
        if contract == ContainerContract::WithReachability {
            args.push(networked.to_string());
        }
        Self {
            operation: Operation::CreateContainer,
            args,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation.as_str(), self.args.join(" "))
    }
}

/// A group of invocations announced by one status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub banner: String,
    pub invocations: Vec<Invocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub phases: Vec<Phase>,
}

impl Plan {
    pub fn invocations(&self) -> impl Iterator<Item = &Invocation> {
        self.phases.iter().flat_map(|phase| phase.invocations.iter())
    }

    pub fn total_invocations(&self) -> usize {
        self.phases.iter().map(|phase| phase.invocations.len()).sum()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.invocations()
            .filter(|invocation| invocation.operation == operation)
            .count()
    }
}
