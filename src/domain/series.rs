// Status-filtered series built from fetched proposal groups
use super::error::DomainError;
use super::period;
use super::proposal::{ProposalStatusGroup, Status};
use serde::Serialize;

/// One point of the area chart. `period` is the x-axis key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub category: String,
    #[serde(rename = "date")]
    pub period: String,
    pub value: u64,
}

impl SeriesPoint {
    pub fn new(category: impl Into<String>, period: impl Into<String>, value: u64) -> Self {
        Self {
            category: category.into(),
            period: period.into(),
            value,
        }
    }
}

/// Flatten the events of every group whose status is `selected`, in input
/// order. Duplicate groups are concatenated and duplicate (category, period)
/// pairs are kept as separate points; ordering along the axis is left to the
/// chart widget.
pub fn build_series(
    groups: &[ProposalStatusGroup],
    selected: Status,
) -> Result<Vec<SeriesPoint>, DomainError> {
    groups
        .iter()
        .filter(|group| group.status == selected)
        .flat_map(|group| group.proposals.iter())
        .map(|event| -> Result<SeriesPoint, DomainError> {
            Ok(SeriesPoint::new(
                event.category.clone(),
                period::label(event.month, event.year)?,
                event.count,
            ))
        })
        .collect()
}
