//! Group coordinator
//!
//! The coordinator is responsible for:
//! - Creating a group on every host (create, then verify)
//! - Compensating partial creations (delete, then re-verify)
//! - Best-effort deletion across all hosts

pub mod group;
pub mod saga;

pub use group::GroupCoordinator;
pub use saga::{CreateReport, FailedStep, Phase, RollbackReport, SagaState};
