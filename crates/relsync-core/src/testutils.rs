//! In-memory tracker and hosting-platform doubles for tests.

use crate::issue::Issue;
use crate::tracker::{
    ChangeRequest, ChangeRequestRef, ChangeRequestSource, IssueTracker, VersionCreation,
    VersionRelease,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FakeError(pub String);

#[derive(Default)]
pub struct FakeChangeRequests {
    known: HashMap<ChangeRequestRef, ChangeRequest>,
    requested: Mutex<Vec<ChangeRequestRef>>,
}

impl FakeChangeRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, owner: &str, repo: &str, number: u64, title: &str, body: &str) -> Self {
        self.known.insert(
            ChangeRequestRef::new(owner, repo, number),
            ChangeRequest {
                title: title.to_string(),
                body: body.to_string(),
            },
        );
        self
    }

    pub fn requested(&self) -> Vec<ChangeRequestRef> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChangeRequestSource for FakeChangeRequests {
    async fn fetch_change_request(&self, reference: &ChangeRequestRef) -> Option<ChangeRequest> {
        self.requested.lock().unwrap().push(reference.clone());
        self.known.get(reference).cloned()
    }
}

#[derive(Default)]
pub struct FakeTracker {
    issues: HashMap<String, Issue>,
    versions: Mutex<HashSet<String>>,
    statuses: Vec<String>,
    failing_writes: HashSet<String>,
    pub fail_initialize: bool,
    pub fail_create_version: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.insert(issue.key.clone(), issue);
        self
    }

    pub fn with_version(self, name: &str) -> Self {
        self.versions.lock().unwrap().insert(name.to_string());
        self
    }

    pub fn with_status(mut self, name: &str) -> Self {
        self.statuses.push(name.to_string());
        self
    }

    /// Every write against `key` fails.
    pub fn failing_writes_for(mut self, key: &str) -> Self {
        self.failing_writes.insert(key.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn write(&self, key: &str, call: String) -> Result<(), FakeError> {
        self.record(call);
        if self.failing_writes.contains(key) {
            return Err(FakeError(format!("write rejected for {key}")));
        }
        Ok(())
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    type Error = FakeError;

    async fn initialize(&self) -> Result<(), FakeError> {
        self.record("initialize".to_string());
        if self.fail_initialize {
            return Err(FakeError("project not found".to_string()));
        }
        Ok(())
    }

    async fn fetch_issue(&self, key: &str) -> Result<Issue, FakeError> {
        self.issues
            .get(key)
            .cloned()
            .ok_or_else(|| FakeError(format!("issue {key} not found")))
    }

    async fn create_version(&self, name: &str) -> Result<VersionCreation, FakeError> {
        self.record(format!("create_version {name}"));
        if self.fail_create_version {
            return Err(FakeError("forbidden".to_string()));
        }
        if self.versions.lock().unwrap().insert(name.to_string()) {
            Ok(VersionCreation::Created)
        } else {
            Ok(VersionCreation::AlreadyExists)
        }
    }

    async fn release_version(&self, name: &str, released: bool) -> Result<VersionRelease, FakeError> {
        self.record(format!("release_version {name} {released}"));
        if !self.versions.lock().unwrap().contains(name) {
            return Ok(VersionRelease::NotFound);
        }
        Ok(if released {
            VersionRelease::Released
        } else {
            VersionRelease::LeftUnreleased
        })
    }

    async fn add_version(&self, key: &str, name: &str) -> Result<(), FakeError> {
        self.write(key, format!("add_version {key} {name}"))
    }

    async fn add_component(&self, key: &str, name: &str) -> Result<(), FakeError> {
        self.write(key, format!("add_component {key} {name}"))
    }

    async fn update_status(&self, key: &str, status: &str) -> Result<(), FakeError> {
        self.write(key, format!("update_status {key} {status}"))?;
        if !self.statuses.iter().any(|s| s.eq_ignore_ascii_case(status)) {
            return Err(FakeError(format!("no transition to {status} for {key}")));
        }
        Ok(())
    }
}

/// Log sink for asserting on emitted events.
///
/// `install` routes the current thread's events here until the guard drops,
/// which covers a `#[tokio::test]` on its default single-threaded runtime.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Captured lines containing `needle`.
    pub fn lines_with(&self, needle: &str) -> Vec<String> {
        let buffer = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer)
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
