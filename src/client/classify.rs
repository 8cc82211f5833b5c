//! Outcome classification for per-host attempts

use crate::client::HostAction;
use crate::common::{is_retryable_status, Result};

/// Verdict for one completed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    /// Throttled, server-side or network trouble; worth another attempt
    Retryable,
    /// Caller error; retrying cannot help
    Permanent,
}

/// Classify a response status for `action`.
///
/// A verify that answers 404 is a successful "absent" answer, not a
/// failure. Returns `None` for statuses outside the HTTP range.
pub fn classify_status(action: HostAction, status: u16) -> Option<Classification> {
    if !(100..=599).contains(&status) {
        return None;
    }

    let class = match status {
        200..=299 => Classification::Success,
        404 if action == HostAction::Verify => Classification::Success,
        s if is_retryable_status(s) => Classification::Retryable,
        _ => Classification::Permanent,
    };
    Some(class)
}

/// Classify a raw transport outcome.
///
/// `None` means the outcome is not a domain condition (malformed status
/// or an unrecognized error) and must be propagated by the caller.
pub fn classify(action: HostAction, outcome: &Result<u16>) -> Option<Classification> {
    match outcome {
        Ok(status) => classify_status(action, *status),
        Err(e) if e.is_retryable() => Some(Classification::Retryable),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_success_statuses() {
        assert_eq!(
            classify_status(HostAction::Create, 201),
            Some(Classification::Success)
        );
        assert_eq!(
            classify_status(HostAction::Delete, 200),
            Some(Classification::Success)
        );
        assert_eq!(
            classify_status(HostAction::Verify, 200),
            Some(Classification::Success)
        );
    }

    #[test]
    fn test_throttle_and_server_errors_retryable() {
        for status in [429, 500, 502, 503, 504, 599] {
            assert_eq!(
                classify_status(HostAction::Create, status),
                Some(Classification::Retryable),
                "status {}",
                status
            );
        }
    }

    #[test]
    fn test_client_errors_permanent() {
        for status in [400, 401, 403, 404, 409, 422] {
            assert_eq!(
                classify_status(HostAction::Create, status),
                Some(Classification::Permanent),
                "status {}",
                status
            );
        }
        assert_eq!(
            classify_status(HostAction::Delete, 404),
            Some(Classification::Permanent)
        );
        assert_eq!(
            classify_status(HostAction::Create, 302),
            Some(Classification::Permanent)
        );
    }

    #[test]
    fn test_verify_absent_is_an_answer() {
        assert_eq!(
            classify_status(HostAction::Verify, 404),
            Some(Classification::Success)
        );
        assert_eq!(
            classify_status(HostAction::Verify, 400),
            Some(Classification::Permanent)
        );
    }

    #[test]
    fn test_out_of_range_status_unrecognized() {
        assert_eq!(classify_status(HostAction::Create, 42), None);
        assert_eq!(classify_status(HostAction::Verify, 600), None);
    }

    #[test]
    fn test_transport_errors() {
        let refused: Result<u16> = Err(Error::Transport("connection refused".into()));
        let timeout: Result<u16> = Err(Error::Timeout("10s".into()));
        let defect: Result<u16> = Err(Error::Internal("bug".into()));

        assert_eq!(
            classify(HostAction::Create, &refused),
            Some(Classification::Retryable)
        );
        assert_eq!(
            classify(HostAction::Verify, &timeout),
            Some(Classification::Retryable)
        );
        assert_eq!(classify(HostAction::Delete, &defect), None);
    }

    #[test]
    fn test_classification_is_deterministic() {
        for status in 100..=599u16 {
            let first = classify_status(HostAction::Create, status);
            for _ in 0..3 {
                assert_eq!(classify_status(HostAction::Create, status), first);
            }
        }
    }
}
