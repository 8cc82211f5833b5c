//! Group coordinator
//!
//! Drives the per-host operations across the ordered host set. Host
//! calls within one invocation run strictly in host order; independent
//! invocations share nothing but the immutable host set.

use crate::client::{HostClient, HostReport, HttpTransport, Transport};
use crate::common::{generate_operation_id, Config, Host, HostSet, Result};
use crate::coordinator::saga::{CreateReport, RollbackReport, SagaState};
use tracing::Instrument;

pub struct GroupCoordinator<T = HttpTransport> {
    hosts: HostSet,
    client: HostClient<T>,
}

impl GroupCoordinator<HttpTransport> {
    /// HTTP-backed coordinator for the configured hosts and retry policy.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = HostClient::new(HttpTransport::new(), config.retry.policy());
        Ok(Self::new(HostSet::new(config.hosts.iter().cloned()), client))
    }
}

impl<T: Transport> GroupCoordinator<T> {
    pub fn new(hosts: HostSet, client: HostClient<T>) -> Self {
        Self { hosts, client }
    }

    pub fn hosts(&self) -> &HostSet {
        &self.hosts
    }

    pub fn client(&self) -> &HostClient<T> {
        &self.client
    }

    /// Create `group_id` on every host, or on none.
    ///
    /// Returns `false` when any host failed to create or verify the
    /// group; by then the hosts that had created it have been asked to
    /// delete it again.
    pub async fn create_group(&self, group_id: &str) -> bool {
        self.create_group_with_report(group_id).await.success
    }

    /// Same as [`create_group`](Self::create_group), with the failing
    /// step and rollback results.
    pub async fn create_group_with_report(&self, group_id: &str) -> CreateReport {
        let span = tracing::info_span!(
            "create_group",
            group_id = %group_id,
            operation_id = %generate_operation_id()
        );
        self.run_create(group_id).instrument(span).await
    }

    async fn run_create(&self, group_id: &str) -> CreateReport {
        let hosts = self.hosts.hosts();
        let host_count = hosts.len();
        let mut report = CreateReport {
            success: false,
            failed_at: None,
            rollback: None,
        };

        let mut state = SagaState::Pending;
        loop {
            state = match state {
                SagaState::Pending => state.advance(true, host_count),
                SagaState::Creating(index) => {
                    let created = self.created(&hosts[index], group_id).await;
                    state.advance(created, host_count)
                }
                SagaState::Verifying(index) => {
                    let present = self.present(&hosts[index], group_id).await;
                    state.advance(present, host_count)
                }
                SagaState::RollingBack(step) => {
                    let failed_host = hosts[step.index].clone();
                    tracing::warn!("{} failed on {}, rolling back", step.phase, failed_host);
                    report.failed_at = Some((step.phase, failed_host));

                    let rollback = self
                        .rollback(&hosts[step.rollback_target(host_count)], group_id)
                        .await;
                    let clean = rollback.is_clean();
                    report.rollback = Some(rollback);
                    state.advance(clean, host_count)
                }
                SagaState::Done { success } => {
                    report.success = success;
                    break;
                }
            };
        }

        if report.success {
            tracing::info!("Group {} created on {} hosts", group_id, host_count);
        } else {
            tracing::warn!("Group {} not created", group_id);
        }
        report
    }

    async fn created(&self, host: &Host, group_id: &str) -> bool {
        match self.client.create(host, group_id).await {
            Ok(report) if report.succeeded() => {
                tracing::info!("Group {} created on {}", group_id, host);
                true
            }
            Ok(report) => {
                log_failure(&report);
                false
            }
            Err(e) => {
                tracing::error!("Create on {} raised: {}", host, e);
                false
            }
        }
    }

    async fn present(&self, host: &Host, group_id: &str) -> bool {
        match self.client.verify(host, group_id).await {
            Ok(report) => match report.group_present() {
                Some(true) => true,
                Some(false) => {
                    tracing::warn!("Group {} missing on {} after create", group_id, host);
                    false
                }
                None => {
                    log_failure(&report);
                    false
                }
            },
            Err(e) => {
                tracing::error!("Verify on {} raised: {}", host, e);
                false
            }
        }
    }

    /// Delete then re-verify on each host, in creation order.
    ///
    /// A host counts as failed unless its delete succeeded and a
    /// follow-up verify shows the group gone.
    async fn rollback(&self, hosts: &[Host], group_id: &str) -> RollbackReport {
        let mut report = RollbackReport::default();

        for host in hosts {
            let deleted = match self.client.delete(host, group_id).await {
                Ok(delete) => {
                    if !delete.succeeded() {
                        log_failure(&delete);
                    }
                    delete.succeeded()
                }
                Err(e) => {
                    tracing::error!("Rollback delete on {} raised: {}", host, e);
                    false
                }
            };

            let present = match self.client.verify(host, group_id).await {
                Ok(verify) => verify.group_present(),
                Err(e) => {
                    tracing::error!("Rollback verify on {} raised: {}", host, e);
                    None
                }
            };

            report.compensated.push(host.clone());
            if !deleted || present != Some(false) {
                tracing::warn!(
                    deleted,
                    present = ?present,
                    "Rollback of group {} on {} not confirmed",
                    group_id,
                    host
                );
                report.failed.push(host.clone());
            } else {
                tracing::info!("Group {} rolled back on {}", group_id, host);
            }
        }

        report
    }

    /// Delete `group_id` from every host, best effort.
    ///
    /// Returns the hosts where deletion did not succeed; empty means the
    /// group is gone everywhere.
    pub async fn delete_group(&self, group_id: &str) -> Vec<Host> {
        let span = tracing::info_span!(
            "delete_group",
            group_id = %group_id,
            operation_id = %generate_operation_id()
        );
        self.run_delete(group_id).instrument(span).await
    }

    async fn run_delete(&self, group_id: &str) -> Vec<Host> {
        let mut not_deleted = Vec::new();

        for host in self.hosts.hosts() {
            match self.client.delete(host, group_id).await {
                Ok(report) if report.succeeded() => {
                    tracing::info!("Group {} deleted from {}", group_id, host);
                }
                Ok(report) => {
                    log_failure(&report);
                    not_deleted.push(host.clone());
                }
                Err(e) => {
                    tracing::error!("Delete on {} raised: {}", host, e);
                    not_deleted.push(host.clone());
                }
            }
        }

        not_deleted
    }
}

fn log_failure(report: &HostReport) {
    let Some(error) = report.error() else {
        return;
    };
    tracing::warn!(
        action = %report.action,
        attempts = report.attempts,
        last_error = report.last_error.as_deref().unwrap_or(""),
        "{}",
        error
    );
}
