//! Reductions used by the aggregation views.
//!
//! Every reduction is a pure function over an iterator of already-projected
//! values. Counting and grouping use [`IndexMap`] so iteration follows first
//! occurrence. Ties in [`top_n`] and the key cap in [`group_values`] are
//! defined by that order.

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, NaiveDateTime, SubsecRound, Timelike, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Rows kept by every top-N view.
pub const TOP_N: usize = 5;

/// Distinct keys kept by the grouped distribution view.
pub const MAX_GROUP_KEYS: usize = 5;

/// Sessions strictly shorter than this many seconds count as quick.
pub const QUICK_SESSION_SECS: f64 = 0.5;

/// Wire format of Cowrie `timestamp` fields.
///
/// chrono treats `%.f` as optional and takes up to nine digits, so
/// [`parse_timestamp`] first checks for a literal `.` with one to
/// [`MAX_FRACTION_DIGITS`] digits before the trailing `Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Longest fractional-second part accepted (microseconds).
pub const MAX_FRACTION_DIGITS: usize = 6;

/// `(value, count)` rows, highest count first.
pub type FrequencyTable = Vec<(String, usize)>;

/// Values per key, keys in first-seen order.
pub type GroupedDistribution = IndexMap<String, Vec<f64>>;

/// `(hour, count)` rows, strictly ascending by hour.
pub type TimeBucketSeries = Vec<(DateTime<Utc>, usize)>;

// ---------------------------------------------------------------------------
// Top-N frequency
// ---------------------------------------------------------------------------

/// Count occurrences and keep the `n` most frequent values.
///
/// Equal counts keep first-seen order (the sort is stable).
pub fn top_n<'a, I>(values: I, n: usize) -> FrequencyTable
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut rows: FrequencyTable = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows.truncate(n);
    rows
}

// ---------------------------------------------------------------------------
// Grouped numeric distribution
// ---------------------------------------------------------------------------

/// Collect values per key, keeping only the first `max_keys` distinct keys.
///
/// A key claims its slot when first seen even if its value is `None`, so a
/// key may end up with an empty list. Values for a retained key are kept in
/// input order, including values seen after the key cap was reached.
pub fn group_values<'a, I>(pairs: I, max_keys: usize) -> GroupedDistribution
where
    I: IntoIterator<Item = (&'a str, Option<f64>)>,
{
    let mut groups = GroupedDistribution::new();
    for (key, value) in pairs {
        if !groups.contains_key(key) {
            if groups.len() >= max_keys {
                continue;
            }
            groups.insert(key.to_string(), Vec::new());
        }
        if let (Some(values), Some(value)) = (groups.get_mut(key), value) {
            values.push(value);
        }
    }
    groups
}

// ---------------------------------------------------------------------------
// Time-bucketed count
// ---------------------------------------------------------------------------

/// Parse a Cowrie timestamp as a UTC instant.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let violation = |source| Error::TimestampFormat {
        value: raw.to_string(),
        format: TIMESTAMP_FORMAT,
        source,
    };
    if !has_wire_fraction(raw) {
        return Err(violation(None));
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| violation(Some(e)))
}

/// `.` then 1..=[`MAX_FRACTION_DIGITS`] ASCII digits then `Z`, at the end.
fn has_wire_fraction(raw: &str) -> bool {
    let Some((_, fraction)) = raw.strip_suffix('Z').and_then(|body| body.rsplit_once('.')) else {
        return false;
    };
    (1..=MAX_FRACTION_DIGITS).contains(&fraction.len()) && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// Zero out minutes, seconds and the fractional part.
pub fn truncate_to_hour(ts: DateTime<Utc>) -> DateTime<Utc> {
    let whole = ts.trunc_subsecs(0);
    whole - Duration::seconds(i64::from(whole.minute() * 60 + whole.second()))
}

/// Count timestamps per clock hour, ascending by hour.
///
/// The first timestamp that does not match [`TIMESTAMP_FORMAT`] aborts the
/// whole reduction.
pub fn hourly_counts<'a, I>(timestamps: I) -> Result<TimeBucketSeries>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut buckets: BTreeMap<DateTime<Utc>, usize> = BTreeMap::new();
    for raw in timestamps {
        let hour = truncate_to_hour(parse_timestamp(raw)?);
        *buckets.entry(hour).or_insert(0) += 1;
    }
    Ok(buckets.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Quick / long split
// ---------------------------------------------------------------------------

/// Session durations partitioned at [`QUICK_SESSION_SECS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionSplit {
    pub quick: usize,
    pub long: usize,
}

impl SessionSplit {
    pub fn from_durations(durations: &[f64]) -> Self {
        let quick = durations.iter().filter(|d| **d < QUICK_SESSION_SECS).count();
        Self {
            quick,
            long: durations.len() - quick,
        }
    }

    pub fn total(&self) -> usize {
        self.quick + self.long
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
