pub mod orchestrator;
pub mod plan;

pub use crate::domain::model::{Invocation, Operation, Phase, Plan};
pub use crate::domain::ports::Collaborator;
pub use crate::utils::error::Result;
