use crate::domain::model::Invocation;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Something that can carry out a planned helper call.
///
/// Implementations must block (await) until the helper has finished and
/// report any non-zero exit as an error; the orchestrator relies on that to
/// stop at the first failure.
#[async_trait]
pub trait Collaborator: Send + Sync {
    async fn invoke(&self, invocation: &Invocation) -> Result<()>;
}
