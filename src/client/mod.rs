//! Per-host side of the protocol
//!
//! - Transport: one HTTP-style request, status code or network failure
//! - Classification of each attempt (success / retryable / permanent)
//! - Retrying host operations with bounded exponential backoff

pub mod classify;
pub mod host_client;
pub mod retry;
pub mod transport;

pub use classify::{classify, classify_status, Classification};
pub use host_client::{HostClient, HostReport, OperationOutcome};
pub use retry::RetryPolicy;
pub use transport::{GroupBody, HostAction, HostRequest, HttpTransport, Transport};
