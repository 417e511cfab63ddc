// Dashboard service - Status filter, fetched data and chart readiness
use crate::application::graphs_repository::GraphsRepository;
use crate::application::readiness::{Phase, Readiness, ReadinessController, ReadinessTimings};
use crate::domain::chart::{ChartConfig, ChartStyle};
use crate::domain::dashboard::DashboardView;
use crate::domain::palette::{Palette, PaletteEntry};
use crate::domain::proposal::{ProposalStatusGroup, Status};
use crate::domain::series::build_series;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

#[derive(Debug, Clone)]
enum DataState {
    NotLoaded,
    Loaded(Arc<Vec<ProposalStatusGroup>>),
    Failed(String),
}

#[derive(Debug)]
struct DataSlot {
    data: DataState,
    /// Ticket of the most recently started fetch. Only that fetch may store
    /// its result.
    latest_fetch: u64,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn GraphsRepository>,
    palette: Arc<Palette>,
    chart_style: Arc<ChartStyle>,
    readiness: Arc<ReadinessController>,
    data: Arc<RwLock<DataSlot>>,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn GraphsRepository>,
        palette: Palette,
        chart_style: ChartStyle,
        timings: ReadinessTimings,
    ) -> Self {
        Self {
            repository,
            palette: Arc::new(palette),
            chart_style: Arc::new(chart_style),
            readiness: Arc::new(ReadinessController::new(timings)),
            data: Arc::new(RwLock::new(DataSlot {
                data: DataState::NotLoaded,
                latest_fetch: 0,
            })),
        }
    }

    /// Start the readiness cycle and issue the one fetch.
    pub async fn mount(&self) {
        self.readiness.mount();
        let ticket = self.start_fetch(false).await;
        self.load(ticket).await;
    }

    /// Re-issue the fetch after a failure. Runs a full readiness cycle so the
    /// loading indicator covers the new attempt.
    pub async fn retry(&self) -> DashboardView {
        tracing::info!("Retrying proposal data fetch");
        let ticket = self.start_fetch(true).await;
        self.readiness.restart();
        self.load(ticket).await;
        self.view().await
    }

    /// Apply a filter selection. Re-selecting the current status is a no-op.
    pub async fn select_status(&self, status: Status) -> DashboardView {
        match self.readiness.select(status) {
            Some(generation) => {
                tracing::info!("Selected status {} (generation {})", status, generation)
            }
            None => tracing::debug!("Status {} already selected", status),
        }

        self.view().await
    }

    pub fn selected_status(&self) -> Status {
        self.readiness.snapshot().selected
    }

    pub fn palette(&self) -> Vec<PaletteEntry> {
        self.palette.entries()
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Readiness> {
        self.readiness.subscribe()
    }

    /// Current view, gated by the readiness flags. Status, flags and remount
    /// key all come from one readiness snapshot.
    pub async fn view(&self) -> DashboardView {
        let readiness = self.readiness.snapshot();
        let status = readiness.selected;
        let data = self.data.read().await.data.clone();

        let groups = match data {
            DataState::Failed(message) => return DashboardView::Error { status, message },
            DataState::NotLoaded => return DashboardView::Loading { status },
            DataState::Loaded(groups) => groups,
        };

        match readiness.phase() {
            Phase::Idle | Phase::Loading => return DashboardView::Loading { status },
            Phase::ChartTearingDown => return DashboardView::TearingDown { status },
            Phase::Ready => {}
        }

        match build_series(&groups, status) {
            Ok(points) => {
                let config = ChartConfig::new(points, &self.palette, &self.chart_style);
                DashboardView::chart(status, readiness.generation, config)
            }
            Err(e) => {
                tracing::error!("Cannot build {} series: {}", status, e);
                DashboardView::Error {
                    status,
                    message: e.to_string(),
                }
            }
        }
    }

    async fn start_fetch(&self, clear: bool) -> u64 {
        let mut slot = self.data.write().await;
        if clear {
            slot.data = DataState::NotLoaded;
        }
        slot.latest_fetch += 1;
        slot.latest_fetch
    }

    async fn load(&self, ticket: u64) {
        let data = match self.repository.fetch_status_groups().await {
            Ok(groups) => {
                let events: usize = groups.iter().map(|g| g.proposals.len()).sum();
                tracing::info!(
                    "Loaded {} status groups ({} events)",
                    groups.len(),
                    events
                );
                DataState::Loaded(Arc::new(groups))
            }
            Err(e) => {
                tracing::error!("Error fetching proposal data: {:#}", e);
                DataState::Failed(format!("{:#}", e))
            }
        };

        {
            let mut slot = self.data.write().await;
            if slot.latest_fetch != ticket {
                tracing::debug!(
                    "Discarding result of fetch {} (latest is {})",
                    ticket,
                    slot.latest_fetch
                );
                return;
            }
            slot.data = data;
        }
        self.readiness.note_data_arrival();
    }
}
