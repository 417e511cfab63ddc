// Application layer - Use cases and the seams they depend on
pub mod dashboard_service;
pub mod graphs_repository;
pub mod readiness;
