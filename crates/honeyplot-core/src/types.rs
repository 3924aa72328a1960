//! Core types for honeyplot-core.
//!
//! This module defines the normalised [`EventRecord`] shared by the
//! normalizer, the persisted store and the aggregation engine, plus the
//! [`EventKind`] discriminant for the Cowrie events the charts care about.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known Cowrie field names.
pub mod fields {
    pub const EVENTID: &str = "eventid";
    pub const SRC_IP: &str = "src_ip";
    pub const VERSION: &str = "version";
    pub const DURATION: &str = "duration";
    pub const HASSH: &str = "hassh";
    pub const TIMESTAMP: &str = "timestamp";
}

/// One honeypot-observed action, exactly as it appeared on its input line.
///
/// The record is a JSON object with its key order preserved. Only `eventid`
/// is interpreted eagerly (see [`EventRecord::kind`]); every other field is
/// projected lazily by the aggregation views.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord(Map<String, Value>);

impl EventRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// The raw `eventid` tag, if present and a string.
    pub fn eventid(&self) -> Option<&str> {
        self.str_field(fields::EVENTID)
    }

    /// The recognised event kind, or `None` for events no view consumes.
    pub fn kind(&self) -> Option<EventKind> {
        self.eventid().and_then(EventKind::from_eventid)
    }

    pub fn is(&self, kind: EventKind) -> bool {
        self.eventid() == Some(kind.eventid())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Project a categorical field. Non-string values do not count.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Project a numeric field, coercing numeric strings.
    ///
    /// Cowrie writes `duration` as a JSON number in recent releases and as a
    /// string in older ones. Whitespace around a string value is ignored.
    /// Non-finite results (`"nan"`, `"inf"`) are rejected along with any
    /// other non-coercible value.
    pub fn numeric_field(&self, key: &str) -> Option<f64> {
        let value = match self.0.get(key)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<Map<String, Value>> for EventRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// The Cowrie event kinds consumed by the aggregation views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A client opened a TCP connection to the honeypot.
    SessionConnect,
    /// A session ended; carries the session `duration`.
    SessionClosed,
    /// The client announced its SSH version string.
    ClientVersion,
    /// Key exchange finished; carries the `hassh` fingerprint.
    ClientKex,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::SessionConnect,
        EventKind::SessionClosed,
        EventKind::ClientVersion,
        EventKind::ClientKex,
    ];

    pub fn eventid(self) -> &'static str {
        match self {
            EventKind::SessionConnect => "cowrie.session.connect",
            EventKind::SessionClosed => "cowrie.session.closed",
            EventKind::ClientVersion => "cowrie.client.version",
            EventKind::ClientKex => "cowrie.client.kex",
        }
    }

    pub fn from_eventid(eventid: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.eventid() == eventid)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.eventid())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> EventRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn kind_is_resolved_from_eventid() {
        let r = record(json!({"eventid": "cowrie.client.kex", "hassh": "abc"}));
        assert_eq!(r.kind(), Some(EventKind::ClientKex));
        assert!(r.is(EventKind::ClientKex));
        assert!(!r.is(EventKind::SessionConnect));
    }

    #[test]
    fn unknown_or_missing_eventid_has_no_kind() {
        assert_eq!(record(json!({"eventid": "cowrie.login.failed"})).kind(), None);
        assert_eq!(record(json!({"src_ip": "1.2.3.4"})).kind(), None);
        assert_eq!(record(json!({"eventid": 7})).eventid(), None);
    }

    #[test]
    fn numeric_field_coerces_strings_and_numbers() {
        let r = record(json!({"a": 1.5, "b": " 2.25 ", "c": "abc", "d": null, "e": "nan", "f": 3}));
        assert_eq!(r.numeric_field("a"), Some(1.5));
        assert_eq!(r.numeric_field("b"), Some(2.25));
        assert_eq!(r.numeric_field("c"), None);
        assert_eq!(r.numeric_field("d"), None);
        assert_eq!(r.numeric_field("e"), None);
        assert_eq!(r.numeric_field("f"), Some(3.0));
        assert_eq!(r.numeric_field("missing"), None);
    }

    #[test]
    fn str_field_ignores_non_strings() {
        let r = record(json!({"src_ip": 42, "version": "SSH-2.0-Go"}));
        assert_eq!(r.str_field("src_ip"), None);
        assert_eq!(r.str_field("version"), Some("SSH-2.0-Go"));
    }

    #[test]
    fn key_order_is_preserved() {
        let r: EventRecord = serde_json::from_str(r#"{"z":1,"a":2,"eventid":"x"}"#).unwrap();
        let keys: Vec<_> = r.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "eventid"]);
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(serde_json::from_str::<EventRecord>("[1,2]").is_err());
        assert!(serde_json::from_str::<EventRecord>("5").is_err());
    }
}
