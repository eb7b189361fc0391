//! Results history
//!
//! Newest-first log of finished rounds, capped at 10. Lives for the page
//! session only.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_RESULTS;

/// Summary of one finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Final score
    pub score: u32,
    /// Hits as a percentage of attempts (2 decimals)
    pub accuracy: f64,
    /// Seconds between the two most recent hits (2 decimals, 0 if unknown)
    pub speed: f64,
    /// Round duration in seconds (2 decimals)
    pub time: f64,
    /// Display date
    pub date: String,
    /// Unix timestamp (ms) when the round ended
    pub timestamp_ms: f64,
}

/// Round history, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsLog {
    entries: Vec<RoundResult>,
}

impl ResultsLog {
    /// Create empty log
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_RESULTS + 1),
        }
    }

    /// Record a finished round at the front, evicting the oldest on overflow
    pub fn record(&mut self, result: RoundResult) {
        self.entries.insert(0, result);
        self.entries.truncate(MAX_RESULTS);
        log::debug!("Recorded round result ({} in history)", self.entries.len());
    }

    /// Snapshot ordered by round time, fastest first (stable for ties)
    pub fn sorted_by_time(&self) -> Vec<RoundResult> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
        sorted
    }

    /// Entries in insertion order (newest first)
    pub fn entries(&self) -> &[RoundResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recently recorded result
    pub fn latest(&self) -> Option<&RoundResult> {
        self.entries.first()
    }
}

/// Format a wall-clock timestamp for display
#[cfg(target_arch = "wasm32")]
pub fn format_date(timestamp_ms: f64) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp_ms));
    date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED)
        .into()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn format_date(timestamp_ms: f64) -> String {
    use chrono::{DateTime, Local};

    match DateTime::from_timestamp_millis(timestamp_ms as i64) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn result(score: u32, time: f64) -> RoundResult {
        RoundResult {
            score,
            accuracy: 100.0,
            speed: 0.0,
            time,
            date: String::new(),
            timestamp_ms: 0.0,
        }
    }

    #[test]
    fn test_record_newest_first() {
        let mut log = ResultsLog::new();
        log.record(result(1, 5.0));
        log.record(result(2, 9.0));
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].score, 2);
        assert_eq!(log.latest().map(|r| r.score), Some(2));
    }

    #[test]
    fn test_record_evicts_oldest() {
        let mut log = ResultsLog::new();
        for i in 0..12 {
            log.record(result(i, i as f64));
        }
        assert_eq!(log.len(), MAX_RESULTS);
        assert_eq!(log.entries()[0].score, 11);
        // 0 and 1 were evicted
        assert_eq!(log.entries().last().map(|r| r.score), Some(2));
    }

    #[test]
    fn test_sorted_by_time_does_not_mutate() {
        let mut log = ResultsLog::new();
        log.record(result(1, 7.5));
        log.record(result(2, 3.2));
        log.record(result(3, 5.0));

        let sorted = log.sorted_by_time();
        let times: Vec<f64> = sorted.iter().map(|r| r.time).collect();
        assert_eq!(times, vec![3.2, 5.0, 7.5]);

        let stored: Vec<u32> = log.entries().iter().map(|r| r.score).collect();
        assert_eq!(stored, vec![3, 2, 1]);
    }

    #[test]
    fn test_sorted_by_time_is_stable() {
        let mut log = ResultsLog::new();
        log.record(result(1, 4.0));
        log.record(result(2, 4.0));
        log.record(result(3, 1.0));

        let scores: Vec<u32> = log.sorted_by_time().iter().map(|r| r.score).collect();
        // ties keep stored (newest-first) order
        assert_eq!(scores, vec![3, 2, 1]);
    }

    #[test]
    fn test_format_date_invalid() {
        assert_eq!(format_date(f64::MAX), "N/A");
        assert!(!format_date(1_700_000_000_000.0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_log_capped_and_sorted(times in prop::collection::vec(0.0f64..1000.0, 0..40)) {
            let mut log = ResultsLog::new();
            for (i, t) in times.iter().enumerate() {
                log.record(result(i as u32, *t));
                prop_assert!(log.len() <= MAX_RESULTS);
                prop_assert_eq!(log.entries()[0].score, i as u32);
            }

            let before = log.entries().to_vec();
            let sorted = log.sorted_by_time();
            prop_assert_eq!(sorted.len(), log.len());
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].time <= pair[1].time);
            }
            prop_assert_eq!(log.entries(), before.as_slice());
        }
    }
}
