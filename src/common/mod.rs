//! Common utilities and types shared across cluster-group

pub mod config;
pub mod error;
pub mod host;
pub mod utils;

pub use config::{Config, NodeConfig, RetryConfig};
pub use error::{is_retryable_status, Error, Result};
pub use host::{Host, HostSet, GROUP_PATH};
pub use utils::{encode_group_id, generate_operation_id, parse_duration};
