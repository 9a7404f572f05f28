use crate::risk_history::{RiskHistory, RiskTrend, INITIAL_PERCENTAGE};
use crate::summarizer::{ChatSummary, SummaryLog};
use safeher_common::{HistoryConfig, Level, Message, RiskAssessment};

/// Keeps the risk trend and conversation summaries in step with the chat
pub struct HistoryManager {
    risk: RiskHistory,
    summaries: SummaryLog,
    trend_threshold: u8,
}

impl HistoryManager {
    pub fn new(config: &HistoryConfig) -> Self {
        Self::with_history(config, RiskHistory::new(config.capacity))
    }

    pub fn with_history(config: &HistoryConfig, risk: RiskHistory) -> Self {
        Self {
            risk,
            summaries: SummaryLog::new(config.summary_capacity),
            trend_threshold: config.trend_threshold,
        }
    }

    /// Record one assistant turn. `assessment` is `None` when the reply
    /// carried no risk signal, which leaves the trend untouched.
    pub fn add_exchange(&mut self, conversation: &[Message], assessment: Option<&RiskAssessment>) {
        if let Some(assessment) = assessment {
            self.risk.record_assessment(assessment);
        }

        if conversation.len() >= 2 {
            self.summaries.push(ChatSummary::new(conversation, self.current_level()));
        }
    }

    pub fn current_percentage(&self) -> u8 {
        self.risk
            .latest()
            .map(|entry| entry.percentage)
            .unwrap_or(INITIAL_PERCENTAGE)
    }

    pub fn current_level(&self) -> Level {
        Level::from_percentage(self.current_percentage())
    }

    pub fn trend(&self) -> RiskTrend {
        self.risk.trend(self.trend_threshold)
    }

    pub fn risk_history(&self) -> &RiskHistory {
        &self.risk
    }

    pub fn summaries(&self) -> &SummaryLog {
        &self.summaries
    }
}
