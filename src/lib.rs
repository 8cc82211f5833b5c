//! # cluster-group
//!
//! Creates and deletes a "group" across a fixed set of independent hosts
//! that only expose a create / delete / verify REST contract:
//! - Per-host operations with retry and bounded exponential backoff
//! - Create-then-verify across all hosts, in order
//! - Compensating rollback (delete + re-verify) on partial failure
//! - Best-effort, non-transactional deletion
//!
//! ## Architecture

#![allow(clippy::result_large_err)]
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            GroupCoordinator              │
//! │  create: Creating(i) → Verifying(i)      │
//! │          → Done | RollingBack → Done     │
//! └───────────┬──────────────────────────────┘
//!             │ HostClient (retry + classify)
//!   ┌─────────┴──────────┬──────────────┐
//!   │                    │              │
//! ┌─▼──────────┐   ┌─────▼──────┐   ┌───▼────────┐
//! │ Host 1     │   │ Host 2     │   │ Host 3     │
//! │ /v1/group/ │   │ /v1/group/ │   │ /v1/group/ │
//! └────────────┘   └────────────┘   └────────────┘
//! ```
//!
//! ## Usage
//!
//! ### Start stub hosts
//! ```bash
//! cluster-group-node --id node-1 --bind 127.0.0.1:8001
//! cluster-group-node --id node-2 --bind 127.0.0.1:8002
//! ```
//!
//! ### Use the CLI
//! ```bash
//! cluster-group --hosts http://127.0.0.1:8001,http://127.0.0.1:8002 create my-group
//! cluster-group --hosts http://127.0.0.1:8001,http://127.0.0.1:8002 delete my-group
//! ```

pub mod client;
pub mod common;
pub mod coordinator;
pub mod node;

// Re-export commonly used types
pub use client::{HostClient, HttpTransport, RetryPolicy, Transport};
pub use common::{Config, Error, Host, HostSet, Result};
pub use coordinator::{CreateReport, GroupCoordinator, RollbackReport};
pub use node::NodeServer;

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build info
pub const BUILD_INFO: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CARGO_PKG_NAME"), ")");
