//! Event log sink implementations.
//!
//! Provides in-memory logging and Postgres schema definitions for event
//! persistence. Recording must never fail the caller; backend failures are
//! swallowed after best-effort tracing output.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::util::clock::now_ms;

/// Event tag used by the bootstrap reconciler.
pub const TAG_START_JOBS: &str = "startJobs";

/// Structured event record.
#[derive(Debug, Clone)]
pub struct EventRecord {
    /// Record identifier.
    pub id: String,
    /// Event tag (e.g. `startJobs`).
    pub tag: String,
    /// Human-readable message.
    pub message: String,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

/// Event sink abstraction. Implementations swallow their own failures.
pub trait EventSink: Send + Sync {
    /// Append a structured record.
    fn record(&self, tag: &str, message: &str);
}

/// In-memory event sink with a bounded ring buffer, for testing and dev.
pub struct InMemoryEventSink {
    events: Mutex<VecDeque<EventRecord>>,
    max_events: usize,
}

impl InMemoryEventSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(max_events)),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored records.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.events.lock().iter().cloned().collect()
    }

    /// Records carrying a given tag.
    #[must_use]
    pub fn events_with_tag(&self, tag: &str) -> Vec<EventRecord> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.tag == tag)
            .cloned()
            .collect()
    }
}

impl EventSink for InMemoryEventSink {
    fn record(&self, tag: &str, message: &str) {
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(EventRecord {
            id: uuid::Uuid::new_v4().to_string(),
            tag: tag.to_owned(),
            message: message.to_owned(),
            created_at_ms: now_ms(),
        });
    }
}

/// Postgres-backed event sink (schema-only; DB I/O not wired).
pub struct PostgresEventSink;

impl PostgresEventSink {
    /// Returns SQL migration statements for the system log table.
    #[must_use]
    pub const fn migrations() -> &'static [&'static str] {
        &[r#"
CREATE TABLE IF NOT EXISTS sc_sys_log (
    id UUID PRIMARY KEY,
    tag TEXT NOT NULL,
    message TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS idx_sc_sys_log_tag_created ON sc_sys_log (tag, created_at);
"#]
    }
}

impl EventSink for PostgresEventSink {
    fn record(&self, tag: &str, message: &str) {
        // Stub: actual DB writes require a runtime + client; left to the
        // integration layer. The record is still traced locally.
        tracing::debug!(tag, message, "event sink not wired to database client");
    }
}
