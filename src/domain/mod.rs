// Domain layer - Pure models and transformations
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod palette;
pub mod period;
pub mod proposal;
pub mod series;
