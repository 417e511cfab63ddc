// Repository trait for proposal activity data access
use crate::domain::proposal::ProposalStatusGroup;
use async_trait::async_trait;

#[async_trait]
pub trait GraphsRepository: Send + Sync {
    /// Fetch every status group. Records failing validation are quarantined
    /// by the implementation and never returned.
    async fn fetch_status_groups(&self) -> anyhow::Result<Vec<ProposalStatusGroup>>;
}
