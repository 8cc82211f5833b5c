//! Retrying per-host group operations

use crate::client::{classify, Classification, HostAction, HostRequest, RetryPolicy, Transport};
use crate::common::{Error, Host, Result};

/// Terminal state of one per-host operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    Success,
    /// Permanent rejection on some attempt
    Failed,
    /// Every attempt ended in a retryable failure
    RetriesExhausted,
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationOutcome::Success)
    }
}

/// Result of one retried operation on one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostReport {
    pub host: Host,
    pub action: HostAction,
    /// Status of the last attempt, if the host answered
    pub status: Option<u16>,
    /// Classification of the last attempt
    pub classification: Classification,
    pub attempts: u32,
    /// Transport error of the last attempt, if it never got an answer
    pub last_error: Option<String>,
}

impl HostReport {
    pub fn outcome(&self) -> OperationOutcome {
        match self.classification {
            Classification::Success => OperationOutcome::Success,
            Classification::Permanent => OperationOutcome::Failed,
            Classification::Retryable => OperationOutcome::RetriesExhausted,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome().is_success()
    }

    /// For a successful verify: whether the host still holds the group.
    pub fn group_present(&self) -> Option<bool> {
        if self.action != HostAction::Verify || !self.succeeded() {
            return None;
        }
        Some(self.status != Some(404))
    }

    /// Failure as an error value, for logging
    pub fn error(&self) -> Option<Error> {
        match self.outcome() {
            OperationOutcome::Success => None,
            OperationOutcome::Failed => Some(match self.status {
                Some(status) => Error::HostRejected {
                    host: self.host.to_string(),
                    status,
                },
                None => Error::Internal(format!(
                    "{} on {} failed without a status",
                    self.action, self.host
                )),
            }),
            OperationOutcome::RetriesExhausted => Some(Error::RetriesExhausted {
                host: self.host.to_string(),
                attempts: self.attempts,
            }),
        }
    }
}

/// Executes create/delete/verify against single hosts with retries.
///
/// Holds no per-call state: concurrent calls, even against the same
/// host, keep their own attempt counters and timers.
#[derive(Debug, Clone)]
pub struct HostClient<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> HostClient<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn create(&self, host: &Host, group_id: &str) -> Result<HostReport> {
        self.execute(HostAction::Create, host, group_id).await
    }

    pub async fn delete(&self, host: &Host, group_id: &str) -> Result<HostReport> {
        self.execute(HostAction::Delete, host, group_id).await
    }

    pub async fn verify(&self, host: &Host, group_id: &str) -> Result<HostReport> {
        self.execute(HostAction::Verify, host, group_id).await
    }

    /// Run `action` until it succeeds, fails permanently or runs out of
    /// attempts. `Err` is reserved for defects: malformed statuses and
    /// errors the classifier does not recognize.
    pub async fn execute(
        &self,
        action: HostAction,
        host: &Host,
        group_id: &str,
    ) -> Result<HostReport> {
        let request = HostRequest::new(action, host, group_id, self.policy.timeout);
        let max_attempts = self.policy.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let outcome =
                match tokio::time::timeout(self.policy.timeout, self.transport.send(&request))
                    .await
                {
                    Ok(outcome) => outcome,
                    Err(_) => Err(Error::Timeout(format!(
                        "{} {} after {:?}",
                        request.method, request.url, self.policy.timeout
                    ))),
                };

            let Some(classification) = classify(action, &outcome) else {
                return Err(match outcome {
                    Ok(status) => Error::ProtocolViolation(format!(
                        "{} answered {} with status {}",
                        host, action, status
                    )),
                    Err(e) => e,
                });
            };

            let (status, last_error) = match outcome {
                Ok(status) => (Some(status), None),
                Err(e) => (None, Some(e.to_string())),
            };

            tracing::debug!(
                host = %host,
                action = %action,
                attempt,
                status = ?status,
                classification = ?classification,
                "Host attempt finished"
            );

            if classification != Classification::Retryable || attempt >= max_attempts {
                return Ok(HostReport {
                    host: host.clone(),
                    action,
                    status,
                    classification,
                    attempts: attempt,
                    last_error,
                });
            }

            let wait = self.policy.backoff(attempt);
            tracing::warn!(
                "{} on {} attempt {} failed ({}), retrying in {:?}",
                action,
                host,
                attempt,
                status.map_or_else(
                    || last_error.unwrap_or_default(),
                    |s| format!("status {}", s)
                ),
                wait
            );
            tokio::time::sleep(wait).await;
        }
    }
}
