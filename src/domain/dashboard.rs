// Dashboard view domain model
use super::chart::ChartConfig;
use super::proposal::Status;
use serde::Serialize;

/// What the rendering layer should show right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    /// Loading indicator.
    Loading { status: Status },
    /// Chart unmounted while the previous series is torn down.
    TearingDown { status: Status },
    Error { status: Status, message: String },
    Chart {
        status: Status,
        title: String,
        /// Changes whenever the widget must be remounted instead of updated.
        remount_key: u64,
        config: ChartConfig,
    },
}

impl DashboardView {
    pub fn chart(status: Status, remount_key: u64, config: ChartConfig) -> Self {
        Self::Chart {
            status,
            title: format!("Status: {}", status),
            remount_key,
            config,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Loading { status }
            | Self::TearingDown { status }
            | Self::Error { status, .. }
            | Self::Chart { status, .. } => *status,
        }
    }
}
