// Domain errors
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u32),

    #[error("unknown proposal status: {0:?}")]
    UnknownStatus(String),
}
