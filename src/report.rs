//! Per-level time report
//!
//! Kept in memory for the current run only; shown on the level-complete and
//! game-complete screens.

use serde::{Deserialize, Serialize};

/// Time taken on one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTime {
    /// 0-based level index
    pub level: usize,
    pub elapsed_ms: u64,
}

/// Times for every level cleared in this run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub entries: Vec<LevelTime>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a cleared level
    pub fn record(&mut self, level: usize, elapsed_ms: u64) {
        self.entries.push(LevelTime { level, elapsed_ms });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time of the most recently cleared level
    pub fn last(&self) -> Option<&LevelTime> {
        self.entries.last()
    }

    /// Sum of all recorded level times
    pub fn total_ms(&self) -> u64 {
        self.entries.iter().map(|e| e.elapsed_ms).sum()
    }

    /// Fastest cleared level (earliest wins ties)
    pub fn fastest(&self) -> Option<&LevelTime> {
        self.entries
            .iter()
            .reduce(|best, e| if e.elapsed_ms < best.elapsed_ms { e } else { best })
    }
}

/// Format milliseconds as seconds with one decimal ("12.3s")
pub fn format_time(ms: u64) -> String {
    format!("{}.{}s", ms / 1000, (ms % 1000) / 100)
}
