//! Shared test doubles

#![allow(dead_code)]

use cluster_group::client::{HostAction, HostClient, HostRequest, RetryPolicy, Transport};
use cluster_group::{Error, GroupCoordinator, Host, HostSet, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// What a scripted host answers to one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Status(u16),
    /// Connection refused
    Refused,
    /// Never answers; trips the per-attempt timeout
    Hang,
    /// Error the classifier does not recognize
    Defect,
}

#[derive(Default)]
struct Script {
    /// Queued replies per (host, action); the last one repeats
    replies: HashMap<(String, HostAction), VecDeque<Reply>>,
    calls: Vec<(String, HostAction)>,
}

/// Transport answering from per-host, per-action scripts.
///
/// Unscripted calls answer like a healthy host: 201 for create, 200 for
/// delete and verify.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, host: &str, action: HostAction, replies: &[Reply]) -> &Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .insert((host.to_string(), action), replies.iter().copied().collect());
        self
    }

    pub fn calls(&self) -> Vec<(String, HostAction)> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, host: &str, action: HostAction) -> usize {
        self.calls()
            .iter()
            .filter(|(h, a)| h == host && *a == action)
            .count()
    }

    pub fn count(&self, action: HostAction) -> usize {
        self.calls().iter().filter(|(_, a)| *a == action).count()
    }

    fn next_reply(&self, request: &HostRequest) -> Reply {
        let mut script = self.script.lock().unwrap();
        let host = request.host.to_string();
        script.calls.push((host.clone(), request.action));

        let default = match request.action {
            HostAction::Create => Reply::Status(201),
            HostAction::Delete | HostAction::Verify => Reply::Status(200),
        };
        match script.replies.get_mut(&(host, request.action)) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(default),
            Some(queue) => queue.front().copied().unwrap_or(default),
            None => default,
        }
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: &HostRequest) -> Result<u16> {
        match self.next_reply(request) {
            Reply::Status(status) => Ok(status),
            Reply::Refused => Err(Error::Transport("connection refused".into())),
            Reply::Hang => std::future::pending().await,
            Reply::Defect => Err(Error::Internal("unexpected transport state".into())),
        }
    }
}

pub const A: &str = "http://node-a:8001";
pub const B: &str = "http://node-b:8001";
pub const C: &str = "http://node-c:8001";

pub fn host(addr: &str) -> Host {
    Host::new(addr)
}

pub fn client(transport: &ScriptedTransport) -> HostClient<ScriptedTransport> {
    HostClient::new(transport.clone(), RetryPolicy::default())
}

pub fn coordinator(
    transport: &ScriptedTransport,
    hosts: &[&str],
) -> GroupCoordinator<ScriptedTransport> {
    GroupCoordinator::new(hosts.iter().copied().collect::<HostSet>(), client(transport))
}
