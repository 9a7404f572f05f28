use chrono::{DateTime, Utc};
use safeher_common::{Level, RiskAssessment};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use strum_macros::Display;

/// Level shown before the first reading arrives
pub const INITIAL_PERCENTAGE: u8 = 15;

/// One reading on the safety trend line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskHistoryEntry {
    /// Millisecond timestamp, bumped when two readings share a millisecond
    pub id: i64,
    pub percentage: u8,
    pub timestamp: DateTime<Utc>,
}

/// Direction of the latest reading relative to the one before it
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskTrend {
    Increasing,
    Decreasing,
    Stable,
}

/// Rolling window of the most recent risk readings, oldest first
#[derive(Debug, Clone)]
pub struct RiskHistory {
    capacity: usize,
    entries: VecDeque<RiskHistoryEntry>,
}

impl RiskHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Rebuild from stored readings, keeping only the newest `capacity`
    pub fn from_entries(capacity: usize, entries: Vec<RiskHistoryEntry>) -> Self {
        let mut history = Self::new(capacity);
        for entry in entries {
            history.push(entry);
        }
        history
    }

    pub fn record(&mut self, percentage: u8) -> &RiskHistoryEntry {
        self.record_at(percentage, Utc::now())
    }

    pub fn record_assessment(&mut self, assessment: &RiskAssessment) -> &RiskHistoryEntry {
        self.record(assessment.percentage)
    }

    pub fn record_at(&mut self, percentage: u8, timestamp: DateTime<Utc>) -> &RiskHistoryEntry {
        let mut id = timestamp.timestamp_millis();
        if let Some(last) = self.entries.back() {
            if id <= last.id {
                id = last.id + 1;
            }
        }

        self.push(RiskHistoryEntry {
            id,
            percentage: percentage.min(100),
            timestamp,
        });
        &self.entries[self.entries.len() - 1]
    }

    fn push(&mut self, entry: RiskHistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &RiskHistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<RiskHistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&RiskHistoryEntry> {
        self.entries.back()
    }

    pub fn current_level(&self) -> Option<Level> {
        self.latest().map(|entry| Level::from_percentage(entry.percentage))
    }

    /// Rounded mean of the window
    pub fn average(&self) -> Option<u8> {
        if self.entries.is_empty() {
            return None;
        }
        let total: u32 = self.entries.iter().map(|e| e.percentage as u32).sum();
        let mean = total as f64 / self.entries.len() as f64;
        Some(mean.round() as u8)
    }

    /// Moves of `threshold` points or less count as stable. A lone reading
    /// is compared against `INITIAL_PERCENTAGE`.
    pub fn trend(&self, threshold: u8) -> RiskTrend {
        let mut newest = self.entries.iter().rev();
        let Some(latest) = newest.next() else {
            return RiskTrend::Stable;
        };
        let previous = newest
            .next()
            .map(|entry| entry.percentage)
            .unwrap_or(INITIAL_PERCENTAGE);

        let latest = latest.percentage as i16;
        let previous = previous as i16;
        let threshold = threshold as i16;
        if latest > previous + threshold {
            RiskTrend::Increasing
        } else if latest < previous - threshold {
            RiskTrend::Decreasing
        } else {
            RiskTrend::Stable
        }
    }
}

impl Default for RiskHistory {
    fn default() -> Self {
        Self::new(5)
    }
}
