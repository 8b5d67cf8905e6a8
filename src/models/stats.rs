// src/models/stats.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters collected over one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct SweepStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Sub-categories visited
    pub areas: usize,
    /// Room pages fetched successfully
    pub pages: usize,
    /// Badge-carrying rooms inspected
    pub rooms: usize,
    /// Rooms with an eligible draw
    pub candidates: usize,
    pub joined: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SweepStats {
    pub fn start() -> Self {
        Self {
            start_time: Utc::now(),
            end_time: None,
            areas: 0,
            pages: 0,
            rooms: 0,
            candidates: 0,
            joined: 0,
            skipped: 0,
            failed: 0,
        }
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Utc::now());
    }

    /// Wall-clock duration of the run in milliseconds, if finished.
    pub fn elapsed_ms(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.start_time).num_milliseconds())
    }
}
