// HTTP repository for the upstream graphs endpoint
use crate::application::graphs_repository::GraphsRepository;
use crate::domain::proposal::{ProposalEvent, ProposalStatusGroup, Status};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpGraphsRepository {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RawStatusGroup {
    status: String,
    #[serde(default)]
    eips: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    category: String,
    month: i64,
    year: i64,
    count: i64,
}

/// Records dropped while validating one response.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QuarantineReport {
    pub groups: usize,
    pub events: usize,
}

impl QuarantineReport {
    pub fn is_empty(&self) -> bool {
        self.groups == 0 && self.events == 0
    }
}

impl HttpGraphsRepository {
    pub fn new(base_url: &str, path: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), path),
        })
    }

    async fn execute(&self) -> Result<Vec<serde_json::Value>> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Graphs request failed with status {}: {}", status, body);
        }

        response
            .json::<Vec<serde_json::Value>>()
            .await
            .context("Failed to parse graphs response")
    }
}

#[async_trait]
impl GraphsRepository for HttpGraphsRepository {
    async fn fetch_status_groups(&self) -> Result<Vec<ProposalStatusGroup>> {
        let raw = self.execute().await?;
        let (groups, report) = validate_groups(raw);

        if !report.is_empty() {
            tracing::warn!(
                "Quarantined {} status groups and {} events from {}",
                report.groups,
                report.events,
                self.url
            );
        }
        tracing::debug!("Fetched {} valid status groups from {}", groups.len(), self.url);

        Ok(groups)
    }
}

/// Check the wire records against the domain's invariants. Anything that
/// does not fit is dropped and counted rather than passed downstream.
fn validate_groups(raw: Vec<serde_json::Value>) -> (Vec<ProposalStatusGroup>, QuarantineReport) {
    let mut report = QuarantineReport::default();
    let mut groups = Vec::with_capacity(raw.len());

    for value in raw {
        let (status, eips) = match validate_group(value) {
            Ok(group) => group,
            Err(reason) => {
                tracing::warn!("Dropping status group: {}", reason);
                report.groups += 1;
                continue;
            }
        };

        let mut proposals = Vec::with_capacity(eips.len());
        for value in eips {
            match validate_event(value) {
                Ok(event) => proposals.push(event),
                Err(reason) => {
                    tracing::warn!("Dropping {} event: {}", status, reason);
                    report.events += 1;
                }
            }
        }

        groups.push(ProposalStatusGroup::new(status, proposals));
    }

    (groups, report)
}

fn validate_group(
    value: serde_json::Value,
) -> std::result::Result<(Status, Vec<serde_json::Value>), String> {
    let raw: RawStatusGroup = serde_json::from_value(value).map_err(|e| e.to_string())?;
    let status = raw
        .status
        .parse::<Status>()
        .map_err(|e| format!("{} ({} events)", e, raw.eips.len()))?;
    Ok((status, raw.eips))
}

fn validate_event(value: serde_json::Value) -> std::result::Result<ProposalEvent, String> {
    let raw: RawEvent = serde_json::from_value(value).map_err(|e| e.to_string())?;

    let month = u32::try_from(raw.month)
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| format!("month {} is outside 1..=12", raw.month))?;
    let year = i32::try_from(raw.year).map_err(|_| format!("year {} is out of range", raw.year))?;
    let count =
        u64::try_from(raw.count).map_err(|_| format!("count {} is negative", raw.count))?;

    Ok(ProposalEvent::new(raw.category, month, year, count))
}
