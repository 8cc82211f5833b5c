//! Stub cluster host
//!
//! Serves the per-host group contract from an in-memory registry. Stands
//! in for a real cluster node in demos and end-to-end tests.

pub mod http;
pub mod server;

pub use http::{create_router, NodeState};
pub use server::NodeServer;
