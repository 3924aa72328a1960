//! Static log corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of raw lines shaped like real
//! Cowrie output (trimmed to the fields the views read).

use std::path::{Path, PathBuf};

/// Two attackers across two hours, one scanner that never finishes kex.
pub const CORPUS_SESSIONS: &[&str] = &[
    r#"{"eventid":"cowrie.session.connect","src_ip":"203.0.113.7","src_port":50122,"session":"a1","timestamp":"2024-05-01T12:01:02.000100Z"}"#,
    r#"{"eventid":"cowrie.client.version","version":"SSH-2.0-Go","session":"a1","timestamp":"2024-05-01T12:01:02.200000Z"}"#,
    r#"{"eventid":"cowrie.client.kex","hassh":"4e066189c3bbeec38c99b1855113733a","session":"a1","timestamp":"2024-05-01T12:01:02.300000Z"}"#,
    r#"{"eventid":"cowrie.session.closed","src_ip":"203.0.113.7","duration":"0.31","session":"a1","timestamp":"2024-05-01T12:01:02.400000Z"}"#,
    r#"{"eventid":"cowrie.session.connect","src_ip":"198.51.100.23","src_port":40404,"session":"b2","timestamp":"2024-05-01T12:45:00.500000Z"}"#,
    r#"{"eventid":"cowrie.client.version","version":"SSH-2.0-libssh_0.9.6","session":"b2","timestamp":"2024-05-01T12:45:00.600000Z"}"#,
    r#"{"eventid":"cowrie.client.kex","hassh":"f555226df1963d1d3c09daf865abdc9a","session":"b2","timestamp":"2024-05-01T12:45:00.700000Z"}"#,
    r#"{"eventid":"cowrie.login.failed","username":"root","password":"admin","session":"b2","timestamp":"2024-05-01T12:45:01.000000Z"}"#,
    r#"{"eventid":"cowrie.session.closed","src_ip":"198.51.100.23","duration":12.5,"session":"b2","timestamp":"2024-05-01T12:45:13.000000Z"}"#,
    r#"{"eventid":"cowrie.session.connect","src_ip":"203.0.113.7","src_port":50130,"session":"c3","timestamp":"2024-05-01T13:10:00.000001Z"}"#,
    r#"{"eventid":"cowrie.client.version","version":"SSH-2.0-Go","session":"c3","timestamp":"2024-05-01T13:10:00.100000Z"}"#,
    r#"{"eventid":"cowrie.client.kex","session":"c3","timestamp":"2024-05-01T13:10:00.200000Z"}"#,
    r#"{"eventid":"cowrie.session.closed","src_ip":"203.0.113.7","duration":"0.5","session":"c3","timestamp":"2024-05-01T13:10:00.500000Z"}"#,
];

/// Lines the normalizer must reject.
pub const CORPUS_MALFORMED: &[&str] = &[
    r#"{"eventid":"cowrie.session.connect","src_ip":"#,
    "not json at all",
    "[1, 2, 3]",
    "42",
    r#"{"eventid": "cowrie.session.closed", "duration": 1.0,}"#,
];

/// Events no view consumes.
pub const CORPUS_UNRELATED: &[&str] = &[
    r#"{"eventid":"cowrie.login.failed","username":"admin","password":"1234"}"#,
    r#"{"eventid":"cowrie.command.input","input":"uname -a"}"#,
    r#"{"eventid":"cowrie.direct-tcpip.request","dst_ip":"10.0.0.1","dst_port":25}"#,
];

/// Interleave `good` and `bad` lines with blank lines between them.
pub fn interleaved(good: &[&str], bad: &[&str]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut bad = bad.iter();
    for line in good {
        lines.push(line.to_string());
        if let Some(b) = bad.next() {
            lines.push(String::new());
            lines.push(b.to_string());
        }
    }
    lines.extend(bad.map(|b| b.to_string()));
    lines
}

/// Write `lines` joined by `\n` to `dir/name` and return the path.
pub fn write_fixture<S: AsRef<str>>(dir: &Path, name: &str, lines: &[S]) -> PathBuf {
    let path = dir.join(name);
    let body: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    std::fs::write(&path, body.join("\n")).unwrap();
    path
}
