//! The seven chart views over a normalised record sequence.
//!
//! | View | Filter | Projection | Reduction |
//! |------|--------|------------|-----------|
//! | [`ViewKind::TopAttackerIps`] | `cowrie.session.connect` | `src_ip` | [`top_n`] |
//! | [`ViewKind::TopClientVersions`] | `cowrie.client.version` | `version` | [`top_n`] |
//! | [`ViewKind::SessionDurationHistogram`] | `cowrie.session.closed` | `duration` | value list |
//! | [`ViewKind::AttacksOverTime`] | `cowrie.session.connect` | `timestamp` | [`hourly_counts`] |
//! | [`ViewKind::TopHasshFingerprints`] | `cowrie.client.kex` with `hassh` | `hassh` | [`top_n`] |
//! | [`ViewKind::SessionDurationsByIp`] | `cowrie.session.closed` with `src_ip` | `(src_ip, duration)` | [`group_values`] |
//! | [`ViewKind::QuickVsLongSessions`] | histogram durations | — | [`SessionSplit`] |
//!
//! Each view is recomputed from the borrowed records; nothing is cached
//! between views. A view whose result is empty produces no [`Chart`].

use crate::aggregate::{
    group_values, hourly_counts, top_n, FrequencyTable, GroupedDistribution, SessionSplit,
    TimeBucketSeries, MAX_GROUP_KEYS, TOP_N,
};
use crate::error::{Error, Result};
use crate::types::{fields, EventKind, EventRecord};
use serde::Serialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// View identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    TopAttackerIps,
    TopClientVersions,
    SessionDurationHistogram,
    AttacksOverTime,
    TopHasshFingerprints,
    SessionDurationsByIp,
    QuickVsLongSessions,
}

impl ViewKind {
    /// All views, in output order.
    pub const ALL: [ViewKind; 7] = [
        ViewKind::TopAttackerIps,
        ViewKind::TopClientVersions,
        ViewKind::SessionDurationHistogram,
        ViewKind::AttacksOverTime,
        ViewKind::TopHasshFingerprints,
        ViewKind::SessionDurationsByIp,
        ViewKind::QuickVsLongSessions,
    ];

    /// File stem of the rendered artifact.
    pub fn artifact_name(self) -> &'static str {
        match self {
            ViewKind::TopAttackerIps => "top_5_attacker_ips",
            ViewKind::TopClientVersions => "top_5_ssh_client_versions",
            ViewKind::SessionDurationHistogram => "session_duration_histogram",
            ViewKind::AttacksOverTime => "attacks_over_time",
            ViewKind::TopHasshFingerprints => "top_5_hassh_fingerprints",
            ViewKind::SessionDurationsByIp => "session_durations_by_ip",
            ViewKind::QuickVsLongSessions => "failed_vs_successful_sessions",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::TopAttackerIps => "Top 5 Attacker IPs",
            ViewKind::TopClientVersions => "Top 5 SSH Client Versions",
            ViewKind::SessionDurationHistogram => "Histogram of Session Durations",
            ViewKind::AttacksOverTime => "Attacks Over Time (per hour)",
            ViewKind::TopHasshFingerprints => "Top 5 HASSH Fingerprints",
            ViewKind::SessionDurationsByIp => "Session Durations by Top IPs",
            ViewKind::QuickVsLongSessions => "Failed vs Successful Sessions",
        }
    }

    /// `(x, y)` axis labels. The pie chart has none.
    pub fn axis_labels(self) -> Option<(&'static str, &'static str)> {
        match self {
            ViewKind::TopAttackerIps => Some(("IP Address", "Number of Connections")),
            ViewKind::TopClientVersions => Some(("SSH Client Version", "Count")),
            ViewKind::SessionDurationHistogram => Some(("Duration (seconds)", "Number of Sessions")),
            ViewKind::AttacksOverTime => Some(("Time", "Number of Connections")),
            ViewKind::TopHasshFingerprints => Some(("HASSH Fingerprint", "Count")),
            ViewKind::SessionDurationsByIp => Some(("IP Address", "Duration (seconds)")),
            ViewKind::QuickVsLongSessions => None,
        }
    }
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.artifact_name())
    }
}

// ---------------------------------------------------------------------------
// View output
// ---------------------------------------------------------------------------

/// The reduced data behind one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reduction", content = "data", rename_all = "snake_case")]
pub enum ViewData {
    Frequency(FrequencyTable),
    Distribution(Vec<f64>),
    Grouped(GroupedDistribution),
    TimeSeries(TimeBucketSeries),
    Split(SessionSplit),
}

impl ViewData {
    pub fn is_empty(&self) -> bool {
        match self {
            ViewData::Frequency(rows) => rows.is_empty(),
            ViewData::Distribution(values) => values.is_empty(),
            ViewData::Grouped(groups) => groups.is_empty(),
            ViewData::TimeSeries(series) => series.is_empty(),
            ViewData::Split(split) => split.total() == 0,
        }
    }
}

/// A non-empty view, ready for a [`ChartRenderer`](crate::ChartRenderer).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub view: ViewKind,
    #[serde(flatten)]
    pub data: ViewData,
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Read-only view engine over a normalised record sequence.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    records: &'a [EventRecord],
}

impl<'a> Aggregator<'a> {
    pub fn new(records: &'a [EventRecord]) -> Self {
        Self { records }
    }

    fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &'a EventRecord> + 'a {
        self.records.iter().filter(move |r| r.is(kind))
    }

    pub fn top_attacker_ips(&self) -> FrequencyTable {
        top_n(
            self.of_kind(EventKind::SessionConnect)
                .filter_map(|r| r.str_field(fields::SRC_IP)),
            TOP_N,
        )
    }

    pub fn top_client_versions(&self) -> FrequencyTable {
        top_n(
            self.of_kind(EventKind::ClientVersion)
                .filter_map(|r| r.str_field(fields::VERSION)),
            TOP_N,
        )
    }

    /// Durations of closed sessions; missing or non-numeric values dropped.
    pub fn session_durations(&self) -> Vec<f64> {
        self.of_kind(EventKind::SessionClosed)
            .filter_map(|r| r.numeric_field(fields::DURATION))
            .collect()
    }

    /// Connections per hour.
    ///
    /// Every connect event must carry a string timestamp in the wire format.
    /// A missing, non-string or malformed timestamp fails the whole view.
    pub fn attacks_over_time(&self) -> Result<TimeBucketSeries> {
        let stamps = self
            .of_kind(EventKind::SessionConnect)
            .map(connect_timestamp)
            .collect::<Result<Vec<_>>>()?;
        hourly_counts(stamps)
    }

    pub fn top_hassh_fingerprints(&self) -> FrequencyTable {
        top_n(
            self.of_kind(EventKind::ClientKex)
                .filter_map(|r| r.str_field(fields::HASSH)),
            TOP_N,
        )
    }

    /// Durations of closed sessions for the first five source addresses seen.
    ///
    /// An address counts towards the five as soon as it appears on a closed
    /// event, even when that event's duration is unusable.
    pub fn session_durations_by_ip(&self) -> GroupedDistribution {
        group_values(
            self.of_kind(EventKind::SessionClosed).filter_map(|r| {
                let ip = r.str_field(fields::SRC_IP)?;
                Some((ip, r.numeric_field(fields::DURATION)))
            }),
            MAX_GROUP_KEYS,
        )
    }

    /// Compute every view, returning only the non-empty ones in
    /// [`ViewKind::ALL`] order.
    ///
    /// All views are computed before anything is returned, so a timestamp
    /// violation leaves the caller with no charts at all.
    pub fn charts(&self) -> Result<Vec<Chart>> {
        let durations = self.session_durations();
        let split = SessionSplit::from_durations(&durations);

        let computed = [
            (ViewKind::TopAttackerIps, ViewData::Frequency(self.top_attacker_ips())),
            (ViewKind::TopClientVersions, ViewData::Frequency(self.top_client_versions())),
            (ViewKind::SessionDurationHistogram, ViewData::Distribution(durations)),
            (ViewKind::AttacksOverTime, ViewData::TimeSeries(self.attacks_over_time()?)),
            (ViewKind::TopHasshFingerprints, ViewData::Frequency(self.top_hassh_fingerprints())),
            (ViewKind::SessionDurationsByIp, ViewData::Grouped(self.session_durations_by_ip())),
            (ViewKind::QuickVsLongSessions, ViewData::Split(split)),
        ];

        Ok(computed
            .into_iter()
            .filter_map(|(view, data)| {
                if data.is_empty() {
                    tracing::debug!(%view, "no matching events, skipping view");
                    None
                } else {
                    Some(Chart { view, data })
                }
            })
            .collect())
    }
}

fn connect_timestamp(record: &EventRecord) -> Result<&str> {
    match record.get(fields::TIMESTAMP) {
        Some(Value::String(raw)) => Ok(raw.as_str()),
        Some(other) => Err(Error::TimestampFormat {
            value: other.to_string(),
            format: crate::aggregate::TIMESTAMP_FORMAT,
            source: None,
        }),
        None => Err(Error::MissingField {
            eventid: EventKind::SessionConnect.eventid(),
            field: fields::TIMESTAMP,
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
