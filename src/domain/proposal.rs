// Proposal activity domain models
use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of a proposal. Closed set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Draft,
    Review,
    #[serde(rename = "Last Call")]
    LastCall,
    Final,
    Stagnant,
    Living,
}

impl Status {
    /// Options in the order the filter control presents them.
    pub const OPTIONS: [Status; 6] = [
        Status::Final,
        Status::Review,
        Status::LastCall,
        Status::Stagnant,
        Status::Draft,
        Status::Living,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::Review => "Review",
            Status::LastCall => "Last Call",
            Status::Final => "Final",
            Status::Stagnant => "Stagnant",
            Status::Living => "Living",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::OPTIONS
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownStatus(s.to_string()))
    }
}

/// Number of proposals in `category` that held a status during one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalEvent {
    pub category: String,
    pub month: u32,
    pub year: i32,
    pub count: u64,
}

impl ProposalEvent {
    pub fn new(category: impl Into<String>, month: u32, year: i32, count: u64) -> Self {
        Self {
            category: category.into(),
            month,
            year,
            count,
        }
    }
}

/// One fetched record: every event for a single status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalStatusGroup {
    pub status: Status,
    pub proposals: Vec<ProposalEvent>,
}

impl ProposalStatusGroup {
    pub fn new(status: Status, proposals: Vec<ProposalEvent>) -> Self {
        Self { status, proposals }
    }
}
