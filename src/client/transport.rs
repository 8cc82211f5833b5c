//! Single-request transport to a cluster host

use crate::common::{Host, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Logical per-host action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostAction {
    Create,
    Delete,
    Verify,
}

impl HostAction {
    pub fn method(&self) -> Method {
        match self {
            HostAction::Create => Method::POST,
            HostAction::Delete => Method::DELETE,
            HostAction::Verify => Method::GET,
        }
    }
}

impl fmt::Display for HostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostAction::Create => write!(f, "create"),
            HostAction::Delete => write!(f, "delete"),
            HostAction::Verify => write!(f, "verify"),
        }
    }
}

/// JSON body of create and delete requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBody {
    pub group_id: String,
}

/// One HTTP-style request against one host
#[derive(Debug, Clone)]
pub struct HostRequest {
    pub host: Host,
    pub action: HostAction,
    pub method: Method,
    pub url: String,
    pub body: Option<GroupBody>,
    pub timeout: Duration,
}

impl HostRequest {
    pub fn new(action: HostAction, host: &Host, group_id: &str, timeout: Duration) -> Self {
        let (url, body) = match action {
            HostAction::Create | HostAction::Delete => (
                host.group_url(),
                Some(GroupBody {
                    group_id: group_id.to_string(),
                }),
            ),
            HostAction::Verify => (host.group_item_url(group_id), None),
        };

        Self {
            host: host.clone(),
            action,
            method: action.method(),
            url,
            body,
            timeout,
        }
    }
}

/// Performs a single request and reports the HTTP status.
///
/// Network-level failures come back as [`crate::Error::Transport`] or
/// [`crate::Error::Timeout`]; any other error is treated as a defect by
/// the caller and is not retried.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HostRequest) -> impl Future<Output = Result<u16>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(&self, request: &HostRequest) -> impl Future<Output = Result<u16>> + Send {
        (**self).send(request)
    }
}

/// `reqwest`-backed transport
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &HostRequest) -> Result<u16> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .timeout(request.timeout);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        Ok(response.status().as_u16())
    }
}
