//! Rolling risk history and conversation summaries

pub mod manager;
pub mod risk_history;
pub mod store;
pub mod summarizer;

pub use manager::HistoryManager;
pub use risk_history::{RiskHistory, RiskHistoryEntry, RiskTrend, INITIAL_PERCENTAGE};
pub use store::HistoryStore;
pub use summarizer::{topic_summary, ChatSummary, SummaryLog};
