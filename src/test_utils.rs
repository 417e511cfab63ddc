#[cfg(test)]
pub mod test_utils {
    use crate::application::dashboard_service::DashboardService;
    use crate::application::graphs_repository::GraphsRepository;
    use crate::application::readiness::ReadinessTimings;
    use crate::domain::chart::ChartStyle;
    use crate::domain::palette::Palette;
    use crate::domain::proposal::{ProposalEvent, ProposalStatusGroup, Status};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Repository serving fixed groups, optionally failing the first calls.
    pub struct InMemoryRepository {
        groups: Vec<ProposalStatusGroup>,
        failures_left: AtomicUsize,
        calls: AtomicUsize,
    }

    impl InMemoryRepository {
        pub fn new(groups: Vec<ProposalStatusGroup>) -> Self {
            Self::failing(groups, 0)
        }

        pub fn failing(groups: Vec<ProposalStatusGroup>, failures: usize) -> Self {
            Self {
                groups,
                failures_left: AtomicUsize::new(failures),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GraphsRepository for InMemoryRepository {
        async fn fetch_status_groups(&self) -> anyhow::Result<Vec<ProposalStatusGroup>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let left = self.failures_left.load(Ordering::SeqCst);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::SeqCst);
                anyhow::bail!("connection refused");
            }
            Ok(self.groups.clone())
        }
    }

    pub fn sample_groups() -> Vec<ProposalStatusGroup> {
        vec![
            ProposalStatusGroup::new(
                Status::Draft,
                vec![ProposalEvent::new("Core", 3, 2022, 5)],
            ),
            ProposalStatusGroup::new(
                Status::Final,
                vec![
                    ProposalEvent::new("ERC", 1, 2021, 4),
                    ProposalEvent::new("Meta", 2, 2021, 1),
                ],
            ),
        ]
    }

    pub fn setup_test_service(
        repository: Arc<dyn GraphsRepository>,
        timings: ReadinessTimings,
    ) -> DashboardService {
        DashboardService::new(repository, Palette::default(), ChartStyle::default(), timings)
    }
}
