//! Domain-specific assertion macros for honeyplot harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which aggregation invariant was violated.

use honeyplot_core::aggregate::{FrequencyTable, TimeBucketSeries};
use std::path::Path;

// ---------------------------------------------------------------------------
// Frequency assertions
// ---------------------------------------------------------------------------

/// Assert a frequency table equals the given `(value, count)` rows, in order.
///
/// ```rust
/// assert_frequency!(table, [("1.2.3.4", 2), ("5.6.7.8", 1)]);
/// ```
#[macro_export]
macro_rules! assert_frequency {
    ($table:expr, [$(($value:expr, $count:expr)),* $(,)?]) => {{
        let table: &honeyplot_core::aggregate::FrequencyTable = &$table;
        let expected: honeyplot_core::aggregate::FrequencyTable =
            vec![$(($value.to_string(), $count)),*];
        pretty_assertions::assert_eq!(*table, expected, "frequency table mismatch");
    }};
}

/// Check the structural invariants every top-N table must satisfy.
pub fn check_top_n(table: &FrequencyTable, n: usize, distinct: usize) {
    assert!(table.len() <= n, "top-N table has {} rows, cap is {n}", table.len());
    assert!(
        table.len() <= distinct,
        "top-N table has {} rows but only {distinct} distinct values exist",
        table.len()
    );
    assert!(
        table.windows(2).all(|w| w[0].1 >= w[1].1),
        "top-N table is not sorted by descending count: {table:?}"
    );
}

// ---------------------------------------------------------------------------
// Time series assertions
// ---------------------------------------------------------------------------

/// Assert buckets are strictly ascending and every bucket is on the hour.
pub fn check_hourly(series: &TimeBucketSeries) {
    use chrono::Timelike;
    for w in series.windows(2) {
        assert!(w[0].0 < w[1].0, "buckets not strictly ascending: {:?} then {:?}", w[0].0, w[1].0);
    }
    for (hour, count) in series {
        assert!(*count > 0, "empty bucket at {hour}");
        assert_eq!(
            (hour.minute(), hour.second(), hour.nanosecond()),
            (0, 0, 0),
            "bucket {hour} is not truncated to the hour"
        );
    }
}

// ---------------------------------------------------------------------------
// Artifact assertions
// ---------------------------------------------------------------------------

/// Names of the files directly inside `dir`, sorted.
pub fn artifact_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Assert `dir` exists and contains no files.
#[macro_export]
macro_rules! assert_no_artifacts {
    ($dir:expr) => {{
        let dir: &std::path::Path = $dir.as_ref();
        assert!(dir.is_dir(), "output directory {} was not created", dir.display());
        let names = $crate::common::artifact_names(dir);
        assert!(names.is_empty(), "expected no artifacts, found {names:?}");
    }};
}
