use crate::risk_history::{RiskHistory, RiskHistoryEntry};
use safeher_common::{Result, SafetyError};
use std::path::{Path, PathBuf};

/// Risk history persisted as a JSON array of readings
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means no readings yet
    pub fn load(&self, capacity: usize) -> Result<RiskHistory> {
        if !self.path.exists() {
            tracing::debug!("No history at {}, starting empty", self.path.display());
            return Ok(RiskHistory::new(capacity));
        }

        let content = std::fs::read_to_string(&self.path)?;
        let entries: Vec<RiskHistoryEntry> = serde_json::from_str(&content).map_err(|e| {
            SafetyError::History(format!("{} is not a valid history file: {}", self.path.display(), e))
        })?;
        Ok(RiskHistory::from_entries(capacity, entries))
    }

    pub fn save(&self, history: &RiskHistory) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&history.to_vec())?;
        std::fs::write(&self.path, content)?;
        tracing::debug!("Saved {} readings to {}", history.len(), self.path.display());
        Ok(())
    }
}
