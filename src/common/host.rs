//! Host addressing

use crate::common::utils::encode_group_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Group API path served by every host
pub const GROUP_PATH: &str = "/v1/group/";

/// Base URL of one cluster host, e.g. `http://node1.example.com:8001`.
///
/// Opaque to the coordinator; two hosts are the same host when their
/// addresses are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Host(String);

impl Host {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Collection endpoint used by create and delete
    pub fn group_url(&self) -> String {
        format!("{}{}", self.0.trim_end_matches('/'), GROUP_PATH)
    }

    /// Item endpoint used by verify
    pub fn group_item_url(&self, group_id: &str) -> String {
        format!("{}{}/", self.group_url(), encode_group_id(group_id))
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Host {
    fn from(s: &str) -> Self {
        Host::new(s)
    }
}

impl From<String> for Host {
    fn from(s: String) -> Self {
        Host(s)
    }
}

/// Ordered, immutable host list shared by every invocation of a coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSet(Arc<[Host]>);

impl HostSet {
    pub fn new(hosts: impl IntoIterator<Item = Host>) -> Self {
        Self(hosts.into_iter().collect())
    }

    pub fn hosts(&self) -> &[Host] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<H: Into<Host>> FromIterator<H> for HostSet {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        HostSet::new(iter.into_iter().map(Into::into))
    }
}
