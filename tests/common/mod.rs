//! Shared test fixtures: a scripted database connection and listing builders.

#![allow(dead_code)] // not every integration target uses every fixture

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use lister_core::{DatabaseConnection, Lister, ListerConfig, MemorySessionStore, RequestData, Result};

/// Connection double that replays scripted result sets and records every
/// statement it receives
pub struct ScriptedConnection {
    responses: Mutex<VecDeque<Vec<Value>>>,
    captured: Mutex<Vec<String>>,
}

impl ScriptedConnection {
    pub fn new(responses: Vec<Vec<Value>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            captured: Mutex::new(Vec::new()),
        })
    }

    pub fn captured(&self) -> Vec<String> {
        self.captured.lock().clone()
    }
}

#[async_trait]
impl DatabaseConnection for ScriptedConnection {
    async fn select(&self, sql: &str) -> Result<Vec<Value>> {
        self.captured.lock().push(sql.to_string());
        Ok(self.responses.lock().pop_front().unwrap_or_default())
    }
}

/// Two seeded user rows matching the `test123` mailbox scenarios
pub fn seeded_users() -> Vec<Value> {
    vec![
        json!({"id": 1, "email": "test123@mail.com", "name": "Mail Tester"}),
        json!({"id": 2, "email": "test123@test.com", "name": "Test Tester"}),
    ]
}

pub fn count_row(total: u64) -> Vec<Value> {
    vec![json!({"total": total})]
}

/// A lister over the given request and connection with a 10-row page size
pub fn make_lister(
    request: RequestData,
    connection: Arc<ScriptedConnection>,
    session: Arc<MemorySessionStore>,
) -> Lister {
    let config = ListerConfig {
        results_per_page: 10,
        ..ListerConfig::default()
    };
    Lister::new(Arc::new(request), connection, session, config)
}
