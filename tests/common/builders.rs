//! Test builders — ergonomic constructors for `EventRecord` fixtures.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use honeyplot_core::{EventKind, EventRecord};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`EventRecord`] test fixtures.
///
/// ```rust
/// let record = RecordBuilder::kind(EventKind::SessionConnect)
///     .field("src_ip", "1.2.3.4")
///     .field("timestamp", "2024-05-01T12:00:00.000000Z")
///     .build();
/// ```
pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    pub fn kind(kind: EventKind) -> Self {
        Self::eventid(kind.eventid())
    }

    pub fn eventid(eventid: &str) -> Self {
        Self::new().field("eventid", eventid)
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> EventRecord {
        EventRecord::new(self.fields)
    }

    /// Serialise to a single compact JSON line, as Cowrie writes it.
    pub fn line(self) -> String {
        serde_json::to_string(&self.build()).unwrap()
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

pub fn connect(src_ip: &str, timestamp: &str) -> EventRecord {
    RecordBuilder::kind(EventKind::SessionConnect)
        .field("src_ip", src_ip)
        .field("timestamp", timestamp)
        .build()
}

pub fn closed(src_ip: &str, duration: impl Into<Value>) -> EventRecord {
    RecordBuilder::kind(EventKind::SessionClosed)
        .field("src_ip", src_ip)
        .field("duration", duration)
        .build()
}

pub fn version(version: &str) -> EventRecord {
    RecordBuilder::kind(EventKind::ClientVersion)
        .field("version", version)
        .build()
}

pub fn kex(hassh: &str) -> EventRecord {
    RecordBuilder::kind(EventKind::ClientKex)
        .field("hassh", hassh)
        .build()
}

/// Serialise records as newline-delimited JSON.
pub fn to_lines(records: &[EventRecord]) -> String {
    records
        .iter()
        .map(|r| serde_json::to_string(r).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}
