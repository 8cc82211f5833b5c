//! Create-group saga state machine
//!
//! ```text
//! Pending ─► Creating(0) ─► … ─► Creating(n-1) ─► Verifying(0) ─► … ─► Verifying(n-1) ─► Done(true)
//!                  │ fail                                 │ fail
//!                  ▼                                      ▼
//!            RollingBack(create, i) ────────────► Done(false) ◄──── RollingBack(verify, i)
//! ```
//!
//! The rollback target is decided by the failed step alone: a create
//! failure at host `i` compensates hosts `0..i`, a verify failure
//! compensates every host, since creation succeeded everywhere.

use crate::common::Host;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Protocol phase a step belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Create,
    Verify,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Create => write!(f, "create"),
            Phase::Verify => write!(f, "verify"),
        }
    }
}

/// First step that failed, by host index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailedStep {
    pub phase: Phase,
    pub index: usize,
}

impl FailedStep {
    /// Hosts on which create succeeded before this failure.
    pub fn rollback_target(&self, host_count: usize) -> Range<usize> {
        match self.phase {
            Phase::Create => 0..self.index.min(host_count),
            Phase::Verify => 0..host_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SagaState {
    Pending,
    Creating(usize),
    Verifying(usize),
    RollingBack(FailedStep),
    Done { success: bool },
}

impl SagaState {
    /// First state for a host list of `host_count` entries.
    pub fn start(host_count: usize) -> Self {
        if host_count == 0 {
            SagaState::Done { success: true }
        } else {
            SagaState::Creating(0)
        }
    }

    /// Transition after the step for the current state has run.
    ///
    /// For `RollingBack` the step is the whole compensation pass; its
    /// result never changes the verdict.
    pub fn advance(self, step_succeeded: bool, host_count: usize) -> Self {
        match self {
            SagaState::Pending => SagaState::start(host_count),
            SagaState::Creating(index) if !step_succeeded => SagaState::RollingBack(FailedStep {
                phase: Phase::Create,
                index,
            }),
            SagaState::Creating(index) if index + 1 < host_count => {
                SagaState::Creating(index + 1)
            }
            SagaState::Creating(_) => SagaState::Verifying(0),
            SagaState::Verifying(index) if !step_succeeded => {
                SagaState::RollingBack(FailedStep {
                    phase: Phase::Verify,
                    index,
                })
            }
            SagaState::Verifying(index) if index + 1 < host_count => {
                SagaState::Verifying(index + 1)
            }
            SagaState::Verifying(_) => SagaState::Done { success: true },
            SagaState::RollingBack(_) => SagaState::Done { success: false },
            done @ SagaState::Done { .. } => done,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, SagaState::Done { .. })
    }
}

/// Compensation results, kept for observability only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RollbackReport {
    /// Hosts on which delete + verify was attempted, in creation order
    pub compensated: Vec<Host>,
    /// Hosts that may still hold the group
    pub failed: Vec<Host>,
}

impl RollbackReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Full outcome of a createGroup invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateReport {
    pub success: bool,
    /// Phase and host where the protocol stopped
    pub failed_at: Option<(Phase, Host)>,
    pub rollback: Option<RollbackReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(host_count: usize, results: &[bool]) -> Vec<SagaState> {
        let mut state = SagaState::start(host_count);
        let mut trace = vec![state];
        let mut results = results.iter().copied();
        while !state.is_done() {
            state = state.advance(results.next().unwrap_or(true), host_count);
            trace.push(state);
        }
        trace
    }

    #[test]
    fn test_all_steps_succeed() {
        let trace = run(2, &[true, true, true, true]);
        assert_eq!(
            trace,
            vec![
                SagaState::Creating(0),
                SagaState::Creating(1),
                SagaState::Verifying(0),
                SagaState::Verifying(1),
                SagaState::Done { success: true },
            ]
        );
    }

    #[test]
    fn test_pending_enters_first_create() {
        assert_eq!(SagaState::Pending.advance(true, 2), SagaState::Creating(0));
        assert_eq!(SagaState::Pending.advance(false, 2), SagaState::Creating(0));
        assert!(!SagaState::Pending.is_done());
    }

    #[test]
    fn test_zero_hosts_is_vacuous_success() {
        assert_eq!(SagaState::start(0), SagaState::Done { success: true });
        assert_eq!(
            SagaState::Pending.advance(true, 0),
            SagaState::Done { success: true }
        );
    }

    #[test]
    fn test_create_failure_rolls_back_prefix() {
        let trace = run(3, &[true, false]);
        let failed = FailedStep {
            phase: Phase::Create,
            index: 1,
        };
        assert_eq!(trace[2], SagaState::RollingBack(failed));
        assert_eq!(trace.last(), Some(&SagaState::Done { success: false }));
        assert_eq!(failed.rollback_target(3), 0..1);
    }

    #[test]
    fn test_first_create_failure_has_empty_target() {
        let trace = run(3, &[false]);
        let SagaState::RollingBack(step) = trace[1] else {
            panic!("expected rollback, got {:?}", trace[1]);
        };
        assert!(step.rollback_target(3).is_empty());
    }

    #[test]
    fn test_verify_failure_rolls_back_everything() {
        let trace = run(3, &[true, true, true, true, true, false]);
        let failed = FailedStep {
            phase: Phase::Verify,
            index: 2,
        };
        assert!(trace.contains(&SagaState::RollingBack(failed)));
        assert_eq!(failed.rollback_target(3), 0..3);
        assert_eq!(
            FailedStep {
                phase: Phase::Verify,
                index: 0
            }
            .rollback_target(3),
            0..3
        );
    }

    #[test]
    fn test_single_host_runs_full_sequence() {
        let trace = run(1, &[true, true]);
        assert_eq!(
            trace,
            vec![
                SagaState::Creating(0),
                SagaState::Verifying(0),
                SagaState::Done { success: true },
            ]
        );
    }

    #[test]
    fn test_rollback_outcome_never_changes_verdict() {
        let step = FailedStep {
            phase: Phase::Create,
            index: 0,
        };
        assert_eq!(
            SagaState::RollingBack(step).advance(true, 3),
            SagaState::Done { success: false }
        );
        assert_eq!(
            SagaState::RollingBack(step).advance(false, 3),
            SagaState::Done { success: false }
        );
    }
}
