use chrono::{DateTime, Utc};
use safeher_common::{Level, Message, Role};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

const SUMMARY_PREVIEW_CHARS: usize = 50;

/// Checked in order against the first user message
const TOPIC_KEYWORDS: &[(&[&str], &str)] = &[
    (&["follow", "stalk"], "Being followed concerns"),
    (&["harass", "bother"], "Harassment situation"),
    (&["scared", "afraid", "fear"], "Feeling unsafe"),
    (&["night", "dark", "late"], "Late night safety"),
    (&["alone", "lonely"], "Alone and concerned"),
    (&["walk", "commute", "travel"], "Travel safety"),
    (&["help", "emergency"], "Emergency assistance"),
    (&["home", "house"], "Home safety"),
    (&["work", "office"], "Workplace concerns"),
    (&["transport", "cab", "auto"], "Transport safety"),
];

/// One line in the recent-conversations list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub topic_summary: String,
    pub risk_level: Level,
    pub message_count: usize,
}

impl ChatSummary {
    pub fn new(messages: &[Message], risk_level: Level) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            topic_summary: topic_summary(messages),
            risk_level,
            message_count: messages.len(),
        }
    }
}

/// Short label for a conversation, taken from its first user message
pub fn topic_summary(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "No conversation".to_string();
    }

    let Some(first) = messages.iter().find(|m| m.role == Role::User) else {
        return "General safety discussion".to_string();
    };

    let lowered = first.content.to_lowercase();
    for (keywords, topic) in TOPIC_KEYWORDS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return topic.to_string();
        }
    }

    let preview: String = first.content.chars().take(SUMMARY_PREVIEW_CHARS).collect();
    if preview.len() < first.content.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Most recent summaries, newest first
#[derive(Debug, Clone)]
pub struct SummaryLog {
    capacity: usize,
    summaries: VecDeque<ChatSummary>,
}

impl SummaryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            summaries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, summary: ChatSummary) {
        self.summaries.push_front(summary);
        self.summaries.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatSummary> {
        self.summaries.iter()
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}
