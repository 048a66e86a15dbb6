//! In-memory author source for tests.

use crate::client::{AuthorSource, ClientError, AUTHORS_PATH, AVAILABLE_AUTHORS_PATH, PROFILE_PATH};
use crate::models::{lock_form, AuthorEntry, AuthorProfile, SharedForm};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Serves canned authors and profiles, counts requests, and can hold back
/// individual profile responses until [`FakeSource::release`] is called.
#[derive(Default)]
pub struct FakeSource {
    authors: Vec<AuthorEntry>,
    available: Vec<String>,
    profiles: HashMap<String, String>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    fail_lists: AtomicBool,
    list_requests: AtomicUsize,
    available_requests: AtomicUsize,
    profile_requests: AtomicUsize,
}

impl FakeSource {
    pub fn with_authors(mut self, authors: Vec<AuthorEntry>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_available(mut self, ids: &[&str]) -> Self {
        self.available = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_profile(mut self, uid: &str, display_name: &str) -> Self {
        self.profiles.insert(uid.to_string(), display_name.to_string());
        self
    }

    /// Hold the profile response for `uid` until released.
    pub fn gated(self, uid: &str) -> Self {
        self.gates
            .lock()
            .unwrap()
            .insert(uid.to_string(), Arc::new(Notify::new()));
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_lists.store(failing, Ordering::SeqCst);
    }

    pub fn release(&self, uid: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(uid) {
            gate.notify_one();
        }
    }

    pub fn list_requests(&self) -> usize {
        self.list_requests.load(Ordering::SeqCst)
    }

    pub fn available_requests(&self) -> usize {
        self.available_requests.load(Ordering::SeqCst)
    }

    pub fn profile_requests(&self) -> usize {
        self.profile_requests.load(Ordering::SeqCst)
    }

    fn list_failure(&self, endpoint: &str) -> Option<ClientError> {
        self.fail_lists.load(Ordering::SeqCst).then(|| ClientError::Status {
            endpoint: endpoint.to_string(),
            status: 500,
        })
    }
}

#[async_trait]
impl AuthorSource for FakeSource {
    async fn list_authors(&self) -> Result<Vec<AuthorEntry>, ClientError> {
        self.list_requests.fetch_add(1, Ordering::SeqCst);
        match self.list_failure(AUTHORS_PATH) {
            Some(e) => Err(e),
            None => Ok(self.authors.clone()),
        }
    }

    async fn list_available(&self) -> Result<Vec<String>, ClientError> {
        self.available_requests.fetch_add(1, Ordering::SeqCst);
        match self.list_failure(AVAILABLE_AUTHORS_PATH) {
            Some(e) => Err(e),
            None => Ok(self.available.clone()),
        }
    }

    async fn fetch_profile(&self, uid: &str) -> Result<AuthorProfile, ClientError> {
        self.profile_requests.fetch_add(1, Ordering::SeqCst);

        let gate = self.gates.lock().unwrap().get(uid).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match self.profiles.get(uid) {
            Some(name) => Ok(AuthorProfile {
                display_name: name.clone(),
                id: Some(uid.to_string()),
                ..AuthorProfile::default()
            }),
            None => Err(ClientError::Status {
                endpoint: format!("{}{}", PROFILE_PATH, uid),
                status: 404,
            }),
        }
    }
}

pub fn author(uid: Option<&str>, display: Option<&str>, first: Option<&str>, last: Option<&str>) -> AuthorEntry {
    AuthorEntry {
        uid: uid.map(String::from),
        display_name: display.map(String::from),
        first_name: first.map(String::from),
        last_name: last.map(String::from),
    }
}

/// Poll until option `index` carries `label`, failing the test after two seconds.
pub async fn wait_for_label(form: &SharedForm, index: usize, label: &str) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        let current = lock_form(form)
            .selector
            .options
            .get(index)
            .map(|o| o.label.clone());
        if current.as_deref() == Some(label) {
            return;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("option {} never became {:?}, last seen {:?}", index, label, current);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
